//! Message trait for values shared with callbacks.

/// A marker trait for values that flow through hooks, events and state
/// containers.
///
/// Messages must be `Send + Sync + 'static` so a registry or container can be
/// shared behind an `Arc` and handed to async tasks. Every such type is a
/// message; the trait exists to give bounds a readable name.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Debug)]
/// struct Inbox { unread: usize }
///
/// let inbox = StateContainer::new(Inbox { unread: 0 }, "inboxChanged", bus);
/// ```
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn message_name<T: Message>(_: &T) -> &'static str {
        std::any::type_name::<T>()
    }

    #[test]
    fn test_thread_safe_values_are_messages() {
        assert!(message_name(&String::new()).ends_with("String"));
        assert!(message_name(&Arc::new(vec![1_u8])).contains("Arc"));
        assert!(message_name(&(1_u32, "x")).starts_with("(u32"));
    }
}
