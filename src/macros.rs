//! 宏集合：以字面量形式构造 `FieldValues`，值可以是任何 `Into<SqlValue>`。
//!
//! ```
//! use halo_fragment::field_values;
//!
//! let data = field_values! { "firstName" => "Aliya", "age" => 32 };
//! assert_eq!(data.len(), 2);
//! ```

#[macro_export]
macro_rules! field_values {
    () => {
        $crate::FieldValues::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::FieldValues::new();
        $(
            values.insert($field, $value);
        )*
        values
    }};
}
