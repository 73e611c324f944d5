/// Declares a newtype or struct that is published under a fixed topic key.
///
/// ```ignore
/// property! {
///     MetaField, Meta, key = "name";
///     pub struct Name(pub CompactString);
/// }
/// ```
#[macro_export]
macro_rules! property {
    (
        $namespace:path, $kind:ident, key = $key:expr;
        $( #[ $meta:meta ] )*
        pub struct $ident:ident $($rest:tt)*
    ) => {
        #[derive(Debug, Clone, PartialEq, $crate::_serde::Serialize, $crate::_serde::Deserialize)]
        $( #[ $meta ] )*
        pub struct $ident $($rest)*

        impl $crate::Property for $ident {
            const KEY: &'static str = $key;
            const KIND: $crate::PropertyKind = $crate::PropertyKind::$kind;
        }

        impl $namespace for $ident {}
    };
}

#[cfg(test)]
mod tests {
    use crate::{Property, PropertyKind};

    trait TestProperty: Property {}

    property! {
        TestProperty, State, key = "foo";
        pub struct Foo(pub u32);
    }

    property! {
        TestProperty, Meta, key = "bar";
        pub struct Bar {
            pub name: String,
            pub value: f64,
        }
    }

    #[test]
    fn properties() {
        assert_eq!(Foo::KEY, "foo");
        assert!(matches!(Foo::KIND, PropertyKind::State));
        assert_eq!(serde_json::to_value(Foo(42)).unwrap(), serde_json::json!(42));

        assert_eq!(Bar::KEY, "bar");
        assert!(matches!(Bar::KIND, PropertyKind::Meta));
        assert_eq!(
            serde_json::to_value(Bar {
                name: "example".to_owned(),
                value: 21.4,
            })
            .unwrap(),
            serde_json::json!({
                "name": "example",
                "value": 21.4,
            }),
        );
    }
}
