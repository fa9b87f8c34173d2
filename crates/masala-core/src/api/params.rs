// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compile-time argument lists for described functions.
//!
//! A described function takes its inputs as a single tuple. The tuple type
//! supplies the arity and the human-readable type names that end up in the
//! API description.

use std::any::TypeId;

/// Argument tuple of a described function. Implemented for tuples of zero to
/// ten elements.
pub trait ParameterTypes: 'static {
    /// Number of inputs.
    const ARITY: usize;

    /// Readable type names of each input, in order.
    fn type_names() -> Vec<String>;

    /// Type ids of each input, in order.
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_parameter_types {
    ($arity:expr; $($ty:ident),*) => {
        impl<$($ty: 'static),*> ParameterTypes for ($($ty,)*) {
            const ARITY: usize = $arity;

            fn type_names() -> Vec<String> {
                vec![$(type_name_of::<$ty>()),*]
            }

            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$ty>()),*]
            }
        }
    };
}

impl_parameter_types!(0;);
impl_parameter_types!(1; A);
impl_parameter_types!(2; A, B);
impl_parameter_types!(3; A, B, C);
impl_parameter_types!(4; A, B, C, D);
impl_parameter_types!(5; A, B, C, D, E);
impl_parameter_types!(6; A, B, C, D, E, F);
impl_parameter_types!(7; A, B, C, D, E, F, G);
impl_parameter_types!(8; A, B, C, D, E, F, G, H);
impl_parameter_types!(9; A, B, C, D, E, F, G, H, I);
impl_parameter_types!(10; A, B, C, D, E, F, G, H, I, J);

/// The type name of `T` with module paths stripped, e.g.
/// `Vec<String>` rather than `alloc::vec::Vec<alloc::string::String>`.
pub fn type_name_of<T: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<T>())
}

fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(ch);
        if !(ch.is_alphanumeric() || ch == '_') {
            segment_start = out.len();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[test]
    fn arity_matches_tuple_length() {
        assert_eq!(<() as ParameterTypes>::ARITY, 0);
        assert_eq!(<(f64,) as ParameterTypes>::ARITY, 1);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as ParameterTypes>::ARITY,
            10
        );
    }

    #[test]
    fn type_names_are_shortened() {
        assert_eq!(type_name_of::<f64>(), "f64");
        assert_eq!(type_name_of::<String>(), "String");
        assert_eq!(type_name_of::<Vec<String>>(), "Vec<String>");
        assert_eq!(type_name_of::<Option<&str>>(), "Option<&str>");
        assert_eq!(
            type_name_of::<BTreeMap<String, Vec<usize>>>(),
            "BTreeMap<String, Vec<usize>>"
        );
        assert_eq!(type_name_of::<Arc<[u8]>>(), "Arc<[u8]>");
    }

    #[test]
    fn tuple_reports_each_name() {
        assert_eq!(
            <(usize, String) as ParameterTypes>::type_names(),
            vec!["usize".to_string(), "String".to_string()]
        );
        assert_eq!(
            <(bool,) as ParameterTypes>::type_ids(),
            vec![TypeId::of::<bool>()]
        );
    }
}
