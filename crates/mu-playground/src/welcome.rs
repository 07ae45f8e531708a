//! The built-in sample program shown when no snippet is shared.

/// Editor content on a plain visit (no `?gist=` parameter in the URL).
pub const WELCOME_TEXT: &str = r"-- Welcome to the Mu playground!
-- The editor content is re-evaluated on every change and the value of
-- the final expression appears in the output pane on the right.

-- Natural numbers as constructor terms:
let zero = Zero();

let three = Suc(Suc(Suc(Zero())));

-- Addition, by recursion on the first argument:
let add = rec add = \x. \y. case x of
{ Zero() -> y
; Suc(n) -> Suc(add n y)
};

let equals = rec equals = \m. \n. case m of
{ Zero() -> case n of
  { Zero() -> True()
  ; Suc(n) -> False()
  }
; Suc(m) -> case n of
  { Zero() -> False()
  ; Suc(n) -> equals m n
  }
};

equals (add zero three) three

-- To share a program, put it in a GitHub gist and open this page
-- with ?gist=<gist id> added to the URL.
";
