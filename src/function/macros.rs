/// Generates one member of the checked function family.
///
/// The generated type stores its body behind an `Arc`, so clones share the
/// body (and any memoization cache wrapped inside it). Combinators whose
/// shape depends on the arity (memoization, currying, reversal,
/// composition) live in `arity.rs`.
macro_rules! checked_function {
    (
        $(#[$meta:meta])*
        $name:ident<$($ty:ident),*>($($arg:ident),*) => $arity:literal
    ) => {
        $(#[$meta])*
        pub struct $name<$($ty,)* R> {
            body: ::std::sync::Arc<
                dyn Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync,
            >,
            memoized: bool,
        }

        impl<$($ty,)* R> Clone for $name<$($ty,)* R> {
            fn clone(&self) -> Self {
                Self {
                    body: ::std::sync::Arc::clone(&self.body),
                    memoized: self.memoized,
                }
            }
        }

        impl<$($ty,)* R> ::std::fmt::Debug for $name<$($ty,)* R> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("arity", &$arity)
                    .field("memoized", &self.memoized)
                    .finish_non_exhaustive()
            }
        }

        impl<$($ty: 'static,)* R: 'static> $name<$($ty,)* R> {
            pub const ARITY: usize = $arity;

            /// Wraps a closure or function item.
            pub fn of<F>(f: F) -> Self
            where
                F: Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static,
            {
                Self {
                    body: ::std::sync::Arc::new(f),
                    memoized: false,
                }
            }

            pub fn new<F>(f: F) -> Self
            where
                F: Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static,
            {
                Self::of(f)
            }

            pub fn apply(&self, $($arg: $ty),*) -> $crate::function::Checked<R> {
                (self.body)($($arg),*)
            }

            pub fn arity(&self) -> usize {
                $arity
            }

            /// Whether this value is a memoizing wrapper. Says nothing about
            /// which inputs have been cached so far.
            pub fn is_memoized(&self) -> bool {
                self.memoized
            }

            /// Plain closure view sharing the same body.
            pub fn to_fn(
                &self,
            ) -> impl Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static {
                let body = ::std::sync::Arc::clone(&self.body);
                move |$($arg: $ty),*| body($($arg),*)
            }

            /// Total view of `f`: failures and panics become `None`.
            pub fn lift<F>(f: F) -> impl Fn($($ty),*) -> Option<R> + Send + Sync + 'static
            where
                F: Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static,
            {
                move |$($arg: $ty),*| {
                    let f = &f;
                    $crate::function::catch_failure(move || f($($arg),*)).ok()
                }
            }

            /// Like [`lift`](Self::lift) but keeps the failure. Panics are
            /// reported as `CommonsError::Panicked`.
            pub fn lift_try<F>(
                f: F,
            ) -> impl Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static
            where
                F: Fn($($ty),*) -> $crate::function::Checked<R> + Send + Sync + 'static,
            {
                move |$($arg: $ty),*| {
                    let f = &f;
                    $crate::function::catch_failure(move || f($($arg),*))
                }
            }

            /// Widens the result type.
            pub fn narrow<R2: 'static>(self) -> $name<$($ty,)* R2>
            where
                R: Into<R2>,
            {
                let body = self.body;
                $name {
                    body: ::std::sync::Arc::new(move |$($arg: $ty),*| {
                        body($($arg),*).map(Into::into)
                    }),
                    memoized: self.memoized,
                }
            }

            /// Feeds the result into `after`.
            pub fn and_then<V, G>(&self, after: G) -> $name<$($ty,)* V>
            where
                V: 'static,
                G: Fn(R) -> $crate::function::Checked<V> + Send + Sync + 'static,
            {
                let body = ::std::sync::Arc::clone(&self.body);
                $name::<$($ty,)* V>::of(move |$($arg: $ty),*| after(body($($arg),*)?))
            }

            /// Single-argument view over the ordered argument tuple.
            pub fn tupled(&self) -> $crate::function::CheckedFunction1<($($ty,)*), R> {
                let body = ::std::sync::Arc::clone(&self.body);
                $crate::function::CheckedFunction1::of(move |($($arg,)*): ($($ty,)*)| {
                    body($($arg),*)
                })
            }

            /// On failure asks `handler` for a fallback and applies it to the
            /// original arguments. A handler returning `None` fails with
            /// `CommonsError::NullArgument`, the original failure kept as cause.
            pub fn recover<H, G>(&self, handler: H) -> Self
            where
                $($ty: Clone,)*
                H: Fn(&$crate::function::Failure) -> Option<G> + Send + Sync + 'static,
                G: Fn($($ty),*) -> R,
            {
                let body = ::std::sync::Arc::clone(&self.body);
                Self::of(move |$($arg: $ty),*| match body($($arg.clone()),*) {
                    Ok(result) => Ok(result),
                    Err(failure) => match handler(&failure) {
                        Some(fallback) => Ok(fallback($($arg),*)),
                        None => Err(failure.context($crate::errors::CommonsError::null_argument(
                            "recovery handler returned no fallback",
                        ))),
                    },
                })
            }

            /// Infallible signature for call sites that cannot propagate a
            /// failure. A failure unwinds with an `UncheckedFailure` payload.
            pub fn unchecked(&self) -> impl Fn($($ty),*) -> R + Send + Sync + 'static {
                let body = ::std::sync::Arc::clone(&self.body);
                move |$($arg: $ty),*| match body($($arg),*) {
                    Ok(result) => result,
                    Err(failure) => $crate::function::raise(failure),
                }
            }
        }
    };
}

pub(crate) use checked_function;
