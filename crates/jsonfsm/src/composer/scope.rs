use crate::value::{Map, Value};

/// What a [`Scope`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// An object, open or closed.
    Object,
    /// An array, open or closed.
    Array,
    /// A finished string.
    String,
    /// A finished number.
    Number,
    /// A finished boolean.
    Boolean,
    /// A finished `null`.
    Null,
}

/// One frame of the composer's stack: a container being filled, or a finished
/// value waiting to be moved into its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    key: Option<String>,
    value: Value,
}

impl Scope {
    pub(crate) fn object(key: Option<String>) -> Self {
        Self {
            key,
            value: Value::Object(Map::new()),
        }
    }

    pub(crate) fn array(key: Option<String>) -> Self {
        Self {
            key,
            value: Value::Array(Vec::new()),
        }
    }

    pub(crate) fn scalar(key: Option<String>, value: Value) -> Self {
        Self { key, value }
    }

    /// The name this scope's value will be inserted under in its parent
    /// object; `None` for array elements and the root.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The value built so far.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The kind of value this scope holds.
    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        match self.value {
            Value::Object(_) => ScopeKind::Object,
            Value::Array(_) => ScopeKind::Array,
            Value::String(_) => ScopeKind::String,
            Value::Number(_) => ScopeKind::Number,
            Value::Boolean(_) => ScopeKind::Boolean,
            Value::Null => ScopeKind::Null,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }

    /// Moves `child`'s value into this container: under its key for an
    /// object, at the end for an array.
    ///
    /// Panics if this is a scalar, or if an object member has no key; the
    /// composer never produces either.
    pub(crate) fn adopt(&mut self, child: Scope) {
        let kind = self.kind();
        match &mut self.value {
            Value::Object(map) => {
                let Some(key) = child.key else {
                    unreachable!("object member without a key");
                };
                map.insert(key, child.value);
            }
            Value::Array(items) => items.push(child.value),
            _ => unreachable!("a {kind:?} scope cannot adopt a child"),
        }
    }
}
