use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// The result of an operation whose effect has already been applied. Awaiting it resolves
/// immediately.
#[derive(Debug)]
#[must_use = "a completion carries the result of the operation"]
pub struct Completion<T> {
    value: Option<T>,
}

impl<T> Completion<T> {
    pub(crate) fn ready(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Take the result without awaiting. Returns `None` if the completion was already polled to
    /// completion.
    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Unpin for Completion<T> {}

impl<T> Future for Completion<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
        match self.get_mut().value.take() {
            Some(value) => Poll::Ready(value),
            None => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Completion;
    use std::{
        future::Future,
        pin::Pin,
        sync::Arc,
        task::{Context, Poll, Wake, Waker},
    };

    struct Noop;

    impl Wake for Noop {
        fn wake(self: Arc<Self>) {}
    }

    #[test]
    fn resolves_on_first_poll() {
        let waker = Waker::from(Arc::new(Noop));
        let mut cx = Context::from_waker(&waker);
        let mut completion = Completion::ready(7);
        assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Ready(7));
        assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Pending);
        assert_eq!(completion.into_inner(), None);
    }

    #[test]
    fn into_inner() {
        assert_eq!(Completion::ready("done").into_inner(), Some("done"));
    }
}
