use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::FieldValue;

use super::{
    CheckboxField, DateField, FieldShape, FileField, HyperLinkField, ImageField, ItemLinkField,
    ItemLinkListField, NumberField, RichTextField, TextField,
};

type Converter = Arc<dyn Fn(&FieldValue) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    shape: &'static str,
    convert: Converter,
}

/// Runtime table from a requested Rust type to the conversion that produces it.
///
/// Built once at start-up and then shared read-only; lookups are keyed by
/// [`TypeId`], so each type has at most one conversion.
#[derive(Clone, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<TypeId, Registration>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that already knows every built-in field shape.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register::<FieldValue>()
            .register::<TextField>()
            .register::<RichTextField>()
            .register::<NumberField>()
            .register::<DateField>()
            .register::<CheckboxField>()
            .register::<ImageField>()
            .register::<FileField>()
            .register::<HyperLinkField>()
            .register::<ItemLinkField>()
            .register::<ItemLinkListField>();
        registry
    }

    pub fn register<S>(&mut self) -> &mut Self
    where
        S: FieldShape + Send + Sync + 'static,
    {
        self.register_fn::<S, _>(S::SHAPE, S::reify)
    }

    /// Registers (or replaces) the conversion used when `T` is requested.
    pub fn register_fn<T, F>(&mut self, shape: &'static str, convert: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&FieldValue) -> Option<T> + Send + Sync + 'static,
    {
        let convert: Converter = Arc::new(move |value: &FieldValue| {
            convert(value).map(|shaped| Box::new(shaped) as Box<dyn Any + Send + Sync>)
        });
        self.shapes
            .insert(TypeId::of::<T>(), Registration { shape, convert });
        self
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.shapes.contains_key(&TypeId::of::<T>())
    }

    pub fn shape_name<T: 'static>(&self) -> Option<&'static str> {
        self.shapes
            .get(&TypeId::of::<T>())
            .map(|registration| registration.shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Converts `value` to `T`; `None` when `T` is unregistered or the conversion fails.
    pub fn reify<T: 'static>(&self, value: &FieldValue) -> Option<T> {
        let registration = self.shapes.get(&TypeId::of::<T>())?;
        let shaped = (registration.convert)(value)?;
        shaped.downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shapes: Vec<_> = self
            .shapes
            .values()
            .map(|registration| registration.shape)
            .collect();
        shapes.sort_unstable();
        f.debug_struct("ShapeRegistry")
            .field("shapes", &shapes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::FieldSet;

    #[derive(Debug, PartialEq)]
    struct Rating(u8);

    #[rstest::rstest]
    fn builtin_shapes_are_registered() {
        let registry = ShapeRegistry::with_builtin();
        assert_eq!(registry.len(), 11);
        assert!(registry.contains::<DateField>());
        assert_eq!(registry.shape_name::<TextField>(), Some("text"));

        let value = FieldValue::new(json!({"value": "Hi"}));
        let text: TextField = registry.reify(&value).unwrap();
        assert_eq!(text.value, "Hi");
    }

    #[rstest::rstest]
    fn caller_shapes_can_be_added() {
        let mut registry = ShapeRegistry::new();
        registry.register_fn::<Rating, _>("rating", |value| {
            value
                .inner()
                .as_u64()
                .filter(|stars| *stars <= 5)
                .map(|stars| Rating(stars as u8))
        });

        let fields = FieldSet::from_json(json!({"Stars": {"value": 4}, "Broken": {"value": 9}}));
        assert_eq!(fields.try_read_with::<Rating>(&registry, "stars"), Some(Rating(4)));
        assert_eq!(fields.try_read_with::<Rating>(&registry, "broken"), None);
        let err = fields.read_with::<Rating>(&registry, "broken").unwrap_err();
        assert_eq!(err.to_string(), "field `broken` cannot be read as rating");
    }

    #[rstest::rstest]
    fn unregistered_types_are_not_found() {
        let registry = ShapeRegistry::new();
        let fields = FieldSet::from_json(json!({"Title": {"value": "Hi"}}));
        assert_eq!(fields.try_read_with::<TextField>(&registry, "title"), None);
        let err = fields.read_with::<TextField>(&registry, "title").unwrap_err();
        assert!(err.to_string().contains("unregistered shape"));
    }

    #[rstest::rstest]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShapeRegistry>();
    }
}
