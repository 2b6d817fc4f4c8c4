/// Scope functions for chaining a value through a closure.
pub trait LetAlso: Sized {
    /// Passes the value into `f` and returns whatever `f` returns.
    fn let_owned<R, F: FnOnce(Self) -> R>(self, f: F) -> R {
        f(self)
    }
}

impl<T> LetAlso for T {}
