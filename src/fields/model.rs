use crate::types::FieldSet;

/// A caller-defined model filled from a [`FieldSet`] by member name.
///
/// Members without a matching (or convertible) field keep their default
/// value, so an empty set always yields `Self::default()`.
pub trait FromFieldSet: Default {
    fn populate(&mut self, fields: &FieldSet);

    fn from_field_set(fields: &FieldSet) -> Self {
        let mut model = Self::default();
        model.populate(fields);
        model
    }
}

/// Declares a struct of field shapes together with its [`FromFieldSet`] impl.
///
/// Each member is looked up case-insensitively by its own name, or by the
/// name given in a `#[field = "..."]` attribute. Doc comments on a member
/// go before its `#[field]` attribute. The generated struct derives
/// `Debug`, `Clone`, `Default` and `PartialEq`.
///
/// ```
/// use sitecore_layout::field_model;
/// use sitecore_layout::fields::{ImageField, TextField};
///
/// field_model! {
///     pub struct Hero {
///         pub title: TextField,
///         /// Banner behind the title.
///         #[field = "Hero Image"]
///         pub image: ImageField,
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_model {
    (@key $member:ident $key:literal) => {
        $key
    };
    (@key $member:ident) => {
        stringify!($member)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[field = $key:literal])?
                $member_vis:vis $member:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $member_vis $member: $ty,
            )*
        }

        impl $crate::fields::FromFieldSet for $name {
            fn populate(&mut self, fields: &$crate::FieldSet) {
                $(
                    if let Some(value) = fields.try_read::<$ty>(
                        $crate::field_model!(@key $member $($key)?)
                    ) {
                        self.$member = value;
                    }
                )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use serde_json::json;

    use crate::fields::{CheckboxField, DateField, ImageField, NumberField, TextField};
    use crate::FieldSet;

    crate::field_model! {
        struct Article {
            /// Headline shown in listings.
            title: TextField,
            /// Lifetime page views.
            #[field = "Page Views"]
            views: NumberField,
            /// First publication.
            /// Unset for drafts.
            published: DateField,
            featured: CheckboxField,
            #[field = "Hero Image"]
            image: ImageField,
        }
    }

    #[rstest::rstest]
    fn empty_set_yields_defaults() {
        let article: Article = FieldSet::new().reify_all();
        assert_eq!(article, Article::default());
        assert!(article.published.is_unset());
    }

    #[rstest::rstest]
    fn fills_members_by_case_insensitive_name() {
        let fields = FieldSet::from_json(json!({
            "Title": {"value": "Release notes"},
            "page views": {"value": "1200"},
            "FEATURED": {"value": "1"},
            "Hero Image": {"value": {"src": "/hero.png"}},
            "Unrelated": {"value": "ignored"}
        }));
        let article: Article = fields.reify_all();
        assert_eq!(article.title.value, "Release notes");
        assert_eq!(article.views.value, BigDecimal::from(1200));
        assert!(article.featured.value);
        assert_eq!(article.image.value.src, "/hero.png");
        assert!(article.published.is_unset());
    }

    #[rstest::rstest]
    fn unconvertible_members_keep_defaults() {
        let fields = FieldSet::from_json(json!({
            "title": {"value": {"nested": true}},
            "published": {"value": "yesterday"}
        }));
        let article: Article = fields.reify_all();
        assert_eq!(article.title, TextField::default());
        assert!(article.published.is_unset());
    }
}
