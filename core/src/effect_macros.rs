//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is moved into the future, so clone any `Arc`'d dependencies
/// out of the environment before invoking the macro.
///
/// # Example
///
/// ```rust,ignore
/// use mantra_core::async_effect;
///
/// let storage = Arc::clone(&env.storage);
/// async_effect! {
///     let count = storage.get("count").await.ok().flatten();
///     Some(CounterAction::Loaded { count, target: None })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        AsyncResult { value: i32 },
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[tokio::test]
    async fn test_async_effect_captures_by_move() {
        let value = 7;
        let effect = async_effect! {
            Some(TestAction::AsyncResult { value })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a Future effect");
        };
        assert_eq!(fut.await, Some(TestAction::AsyncResult { value: 7 }));
    }
}
