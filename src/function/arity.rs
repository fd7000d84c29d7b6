use std::hash::Hash;
use std::sync::Arc;

use super::macros::checked_function;
use super::memo::Memo;
use super::Checked;

checked_function! {
    /// Checked supplier: `() -> Result<R, Failure>`.
    CheckedFunction0<>() => 0
}

checked_function! {
    /// Checked function of one argument.
    CheckedFunction1<T1>(t1) => 1
}

checked_function! {
    /// Checked function of two arguments.
    CheckedFunction2<T1, T2>(t1, t2) => 2
}

checked_function! {
    /// Checked function of three arguments.
    CheckedFunction3<T1, T2, T3>(t1, t2, t3) => 3
}

checked_function! {
    /// Checked function of four arguments.
    CheckedFunction4<T1, T2, T3, T4>(t1, t2, t3, t4) => 4
}

// ============================================================
// Arity 0
// ============================================================

impl<R: 'static> CheckedFunction0<R> {
    /// Runs `before` first; its failure short-circuits the body.
    pub fn compose<G>(&self, before: G) -> Self
    where
        G: Fn() -> Checked<()> + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        Self::of(move || {
            before()?;
            body()
        })
    }

    pub fn curried(&self) -> Self {
        self.clone()
    }

    pub fn reversed(&self) -> Self {
        self.clone()
    }
}

impl<R> CheckedFunction0<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Evaluates the supplier at most once successfully, then replays the value.
    pub fn memoized(&self) -> Self {
        if self.memoized {
            return self.clone();
        }
        let body = Arc::clone(&self.body);
        let memo: Memo<(), R> = Memo::new();
        Self {
            body: Arc::new(move || memo.get_or_try_insert_with((), || body())),
            memoized: true,
        }
    }
}

// ============================================================
// Arity 1
// ============================================================

impl<T1: 'static, R: 'static> CheckedFunction1<T1, R> {
    /// Runs `before` on the input and feeds its result to this function.
    pub fn compose<V, G>(&self, before: G) -> CheckedFunction1<V, R>
    where
        V: 'static,
        G: Fn(V) -> Checked<T1> + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction1::of(move |v: V| body(before(v)?))
    }

    pub fn curried(&self) -> Self {
        self.clone()
    }

    pub fn reversed(&self) -> Self {
        self.clone()
    }
}

impl<T1, R> CheckedFunction1<T1, R>
where
    T1: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Caches results keyed by the argument.
    pub fn memoized(&self) -> Self {
        if self.memoized {
            return self.clone();
        }
        let body = Arc::clone(&self.body);
        let memo: Memo<T1, R> = Memo::new();
        Self {
            body: Arc::new(move |t1: T1| memo.get_or_try_insert_with(t1.clone(), || body(t1))),
            memoized: true,
        }
    }
}

// ============================================================
// Arity 2
// ============================================================

impl<T1: 'static, T2: 'static, R: 'static> CheckedFunction2<T1, T2, R> {
    /// `before` produces the argument pair.
    pub fn compose<V, G>(&self, before: G) -> CheckedFunction1<V, R>
    where
        V: 'static,
        G: Fn(V) -> Checked<(T1, T2)> + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction1::of(move |v: V| {
            let (t1, t2) = before(v)?;
            body(t1, t2)
        })
    }

    pub fn reversed(&self) -> CheckedFunction2<T2, T1, R> {
        let body = Arc::clone(&self.body);
        CheckedFunction2::of(move |t2: T2, t1: T1| body(t1, t2))
    }

    /// Applies the first argument, leaving a function of the second.
    pub fn apply_partial(&self, t1: T1) -> CheckedFunction1<T2, R>
    where
        T1: Clone + Send + Sync,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction1::of(move |t2: T2| body(t1.clone(), t2))
    }
}

impl<T1, T2, R> CheckedFunction2<T1, T2, R>
where
    T1: Clone + Send + Sync + 'static,
    T2: 'static,
    R: 'static,
{
    pub fn curried(&self) -> CheckedFunction1<T1, CheckedFunction1<T2, R>> {
        let this = self.clone();
        CheckedFunction1::of(move |t1: T1| Ok(this.apply_partial(t1)))
    }
}

impl<T1, T2, R> CheckedFunction2<T1, T2, R>
where
    T1: Eq + Hash + Clone + Send + Sync + 'static,
    T2: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Caches results keyed by the argument tuple.
    pub fn memoized(&self) -> Self {
        if self.memoized {
            return self.clone();
        }
        let body = Arc::clone(&self.body);
        let memo: Memo<(T1, T2), R> = Memo::new();
        Self {
            body: Arc::new(move |t1: T1, t2: T2| {
                memo.get_or_try_insert_with((t1.clone(), t2.clone()), || body(t1, t2))
            }),
            memoized: true,
        }
    }
}

// ============================================================
// Arity 3
// ============================================================

impl<T1: 'static, T2: 'static, T3: 'static, R: 'static> CheckedFunction3<T1, T2, T3, R> {
    pub fn compose<V, G>(&self, before: G) -> CheckedFunction1<V, R>
    where
        V: 'static,
        G: Fn(V) -> Checked<(T1, T2, T3)> + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction1::of(move |v: V| {
            let (t1, t2, t3) = before(v)?;
            body(t1, t2, t3)
        })
    }

    pub fn reversed(&self) -> CheckedFunction3<T3, T2, T1, R> {
        let body = Arc::clone(&self.body);
        CheckedFunction3::of(move |t3: T3, t2: T2, t1: T1| body(t1, t2, t3))
    }

    pub fn apply_partial(&self, t1: T1) -> CheckedFunction2<T2, T3, R>
    where
        T1: Clone + Send + Sync,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction2::of(move |t2: T2, t3: T3| body(t1.clone(), t2, t3))
    }
}

impl<T1, T2, T3, R> CheckedFunction3<T1, T2, T3, R>
where
    T1: Clone + Send + Sync + 'static,
    T2: Clone + Send + Sync + 'static,
    T3: 'static,
    R: 'static,
{
    pub fn curried(&self) -> CheckedFunction1<T1, CheckedFunction1<T2, CheckedFunction1<T3, R>>> {
        let this = self.clone();
        CheckedFunction1::of(move |t1: T1| Ok(this.apply_partial(t1).curried()))
    }
}

impl<T1, T2, T3, R> CheckedFunction3<T1, T2, T3, R>
where
    T1: Eq + Hash + Clone + Send + Sync + 'static,
    T2: Eq + Hash + Clone + Send + Sync + 'static,
    T3: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    pub fn memoized(&self) -> Self {
        if self.memoized {
            return self.clone();
        }
        let body = Arc::clone(&self.body);
        let memo: Memo<(T1, T2, T3), R> = Memo::new();
        Self {
            body: Arc::new(move |t1: T1, t2: T2, t3: T3| {
                let key = (t1.clone(), t2.clone(), t3.clone());
                memo.get_or_try_insert_with(key, || body(t1, t2, t3))
            }),
            memoized: true,
        }
    }
}

// ============================================================
// Arity 4
// ============================================================

impl<T1: 'static, T2: 'static, T3: 'static, T4: 'static, R: 'static>
    CheckedFunction4<T1, T2, T3, T4, R>
{
    pub fn compose<V, G>(&self, before: G) -> CheckedFunction1<V, R>
    where
        V: 'static,
        G: Fn(V) -> Checked<(T1, T2, T3, T4)> + Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction1::of(move |v: V| {
            let (t1, t2, t3, t4) = before(v)?;
            body(t1, t2, t3, t4)
        })
    }

    pub fn reversed(&self) -> CheckedFunction4<T4, T3, T2, T1, R> {
        let body = Arc::clone(&self.body);
        CheckedFunction4::of(move |t4: T4, t3: T3, t2: T2, t1: T1| body(t1, t2, t3, t4))
    }

    pub fn apply_partial(&self, t1: T1) -> CheckedFunction3<T2, T3, T4, R>
    where
        T1: Clone + Send + Sync,
    {
        let body = Arc::clone(&self.body);
        CheckedFunction3::of(move |t2: T2, t3: T3, t4: T4| body(t1.clone(), t2, t3, t4))
    }
}

type Curried4<T1, T2, T3, T4, R> =
    CheckedFunction1<T1, CheckedFunction1<T2, CheckedFunction1<T3, CheckedFunction1<T4, R>>>>;

impl<T1, T2, T3, T4, R> CheckedFunction4<T1, T2, T3, T4, R>
where
    T1: Clone + Send + Sync + 'static,
    T2: Clone + Send + Sync + 'static,
    T3: Clone + Send + Sync + 'static,
    T4: 'static,
    R: 'static,
{
    pub fn curried(&self) -> Curried4<T1, T2, T3, T4, R> {
        let this = self.clone();
        CheckedFunction1::of(move |t1: T1| Ok(this.apply_partial(t1).curried()))
    }
}

impl<T1, T2, T3, T4, R> CheckedFunction4<T1, T2, T3, T4, R>
where
    T1: Eq + Hash + Clone + Send + Sync + 'static,
    T2: Eq + Hash + Clone + Send + Sync + 'static,
    T3: Eq + Hash + Clone + Send + Sync + 'static,
    T4: Eq + Hash + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    pub fn memoized(&self) -> Self {
        if self.memoized {
            return self.clone();
        }
        let body = Arc::clone(&self.body);
        let memo: Memo<(T1, T2, T3, T4), R> = Memo::new();
        Self {
            body: Arc::new(move |t1: T1, t2: T2, t3: T3, t4: T4| {
                let key = (t1.clone(), t2.clone(), t3.clone(), t4.clone());
                memo.get_or_try_insert_with(key, || body(t1, t2, t3, t4))
            }),
            memoized: true,
        }
    }
}
