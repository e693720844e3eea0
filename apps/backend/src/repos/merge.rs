//! Partial-update merge.
//!
//! An edit payload is a full entity value where "absent" fields hold their
//! zero value. [`merge`] copies every incoming field that is non-zero and
//! differs from the stored value; everything else is left alone. As a
//! consequence a field can never be cleared to zero or empty through an edit.
//!
//! Each entity declares its mergeable fields once as a list of
//! [`FieldRule`]s; the id and timestamps are never listed.

use crate::errors::domain::NotFoundKind;

/// Overwrite `existing` with `incoming` when `incoming` is non-zero and differs.
///
/// Returns whether `existing` changed.
pub fn merge_value<T>(existing: &mut T, incoming: &T, is_zero: fn(&T) -> bool) -> bool
where
    T: PartialEq + Clone,
{
    if is_zero(incoming) || existing == incoming {
        return false;
    }
    *existing = incoming.clone();
    true
}

/// One mergeable field of entity `E`.
pub struct FieldRule<E> {
    pub name: &'static str,
    pub apply: fn(&mut E, &E) -> bool,
}

/// Build a [`FieldRule`] for `$entity.$field` with a zero predicate.
#[macro_export]
macro_rules! field_rule {
    ($entity:ty, $field:ident, $is_zero:expr) => {
        $crate::repos::merge::FieldRule::<$entity> {
            name: stringify!($field),
            apply: |existing: &mut $entity, incoming: &$entity| {
                $crate::repos::merge::merge_value(
                    &mut existing.$field,
                    &incoming.$field,
                    $is_zero,
                )
            },
        }
    };
}

/// An entity subject to partial update.
pub trait Mergeable: Clone + Send + Sync + 'static {
    /// Kind reported when the target row does not exist.
    fn not_found_kind() -> NotFoundKind;

    /// Primary key; the lookup key for a merge, never merged itself.
    fn id(&self) -> i64;

    fn merge_rules() -> Vec<FieldRule<Self>>;
}

/// Apply every rule of `E`, returning the names of the fields that changed.
pub fn merge<E: Mergeable>(existing: &mut E, incoming: &E) -> Vec<&'static str> {
    E::merge_rules()
        .into_iter()
        .filter_map(|rule| (rule.apply)(existing, incoming).then_some(rule.name))
        .collect()
}

// Zero predicates.

#[allow(clippy::ptr_arg)]
pub fn empty_str(v: &String) -> bool {
    v.is_empty()
}

pub fn zero_f64(v: &f64) -> bool {
    *v == 0.0
}

pub fn zero_i32(v: &i32) -> bool {
    *v == 0
}

pub fn zero_i64(v: &i64) -> bool {
    *v == 0
}

#[allow(clippy::ptr_arg)]
pub fn empty_vec<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

pub fn none<T>(v: &Option<T>) -> bool {
    v.is_none()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{empty_str, merge, merge_value, zero_f64, zero_i32, FieldRule, Mergeable};
    use crate::errors::domain::NotFoundKind;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Widget {
        id: i64,
        name: String,
        price: f64,
        stock: i32,
    }

    impl Mergeable for Widget {
        fn not_found_kind() -> NotFoundKind {
            NotFoundKind::Other("Widget".into())
        }

        fn id(&self) -> i64 {
            self.id
        }

        fn merge_rules() -> Vec<FieldRule<Self>> {
            vec![
                crate::field_rule!(Widget, name, empty_str),
                crate::field_rule!(Widget, price, zero_f64),
                crate::field_rule!(Widget, stock, zero_i32),
            ]
        }
    }

    #[test]
    fn zero_values_are_skipped() {
        let mut existing = Widget {
            id: 1,
            name: "tee".into(),
            price: 50.0,
            stock: 10,
        };
        let incoming = Widget {
            id: 1,
            price: 0.0,
            stock: 20,
            ..Default::default()
        };

        let changed = merge(&mut existing, &incoming);

        assert_eq!(changed, vec!["stock"]);
        assert_eq!(existing.price, 50.0);
        assert_eq!(existing.stock, 20);
        assert_eq!(existing.name, "tee");
    }

    #[test]
    fn equal_values_report_no_change() {
        let mut n = 5;
        assert!(!merge_value(&mut n, &5, |v: &i32| *v == 0));
        assert!(merge_value(&mut n, &6, |v: &i32| *v == 0));
        assert_eq!(n, 6);
    }

    #[test]
    fn id_is_never_merged() {
        let mut existing = Widget {
            id: 1,
            ..Default::default()
        };
        let incoming = Widget {
            id: 99,
            name: "hoodie".into(),
            ..Default::default()
        };
        merge(&mut existing, &incoming);
        assert_eq!(existing.id, 1);
        assert_eq!(existing.name, "hoodie");
    }

    proptest! {
        #[test]
        fn merge_never_clears_and_always_applies_non_zero(
            old_price in 0.0f64..1000.0,
            new_price in prop_oneof![Just(0.0f64), 0.01f64..1000.0],
            old_stock in 0i32..100,
            new_stock in 0i32..100,
        ) {
            let mut existing = Widget { id: 1, name: "a".into(), price: old_price, stock: old_stock };
            let incoming = Widget { id: 1, name: String::new(), price: new_price, stock: new_stock };
            merge(&mut existing, &incoming);

            let expected_price = if new_price == 0.0 { old_price } else { new_price };
            let expected_stock = if new_stock == 0 { old_stock } else { new_stock };
            prop_assert_eq!(existing.price, expected_price);
            prop_assert_eq!(existing.stock, expected_stock);
            prop_assert_eq!(existing.name, "a");
        }
    }
}
