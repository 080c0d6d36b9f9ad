use std::fmt;
use std::sync::Arc;

use super::SchemaNode;

type Getter = dyn Fn() -> SchemaNode + Send + Sync;

/// The getter of a `z.lazy(() => ...)` node.
///
/// Clones share the getter, so a lazy node keeps its identity when the tree
/// that holds it is cloned. The converter uses that identity to detect a lazy
/// schema re-entering itself.
#[derive(Clone)]
pub struct LazySchema {
    getter: Arc<Getter>,
}

impl LazySchema {
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> SchemaNode + Send + Sync + 'static,
    {
        Self {
            getter: Arc::new(getter),
        }
    }

    /// Invoke the getter.
    pub fn get(&self) -> SchemaNode {
        (self.getter)()
    }

    /// Address of the shared getter, stable across clones.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.getter) as *const () as usize
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("id", &format_args!("{:#x}", self.id()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_keeps_identity() {
        let lazy = LazySchema::new(|| SchemaNode::Null);
        let copy = lazy.clone();
        assert_eq!(lazy.id(), copy.id());
        assert_ne!(lazy.id(), LazySchema::new(|| SchemaNode::Null).id());
    }

    #[test]
    fn test_get_invokes_getter() {
        let lazy = LazySchema::new(|| SchemaNode::Boolean { coerce: false });
        assert!(matches!(lazy.get(), SchemaNode::Boolean { coerce: false }));
    }
}
