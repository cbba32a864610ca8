//! halo-sql-fragment：把部分字段更新/过滤条件编译为参数化 SQL 片段。
//!
//! 两个核心入口：
//! - [`build_update_fragment`]：`"first_name"=$1, "age"=$2`，用于 `UPDATE ... SET`；
//! - [`build_filter_fragment`]：`name ILIKE $1 AND num_employees >= $2`，用于 `WHERE`。
//!
//! 二者都返回 [`Fragment`]：片段字符串 + 与占位符一一对应的参数值。

pub mod field_mapper;
pub mod field_values;
pub mod flavor;
pub mod fragment;
#[cfg(feature = "json")]
pub mod json;
pub mod macros;
mod string_builder;
pub mod value;

pub use crate::field_mapper::{
    ColumnMapping, FieldMapperFunc, identity_mapper, kebab_case_mapper, mapper_fn, prefix_mapper,
    resolve_column, snake_case_mapper, suffix_mapper, upper_case_mapper,
};
pub use crate::field_values::FieldValues;
pub use crate::flavor::{Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped};
pub use crate::fragment::{
    DEFAULT_PATTERN_KEY, Fragment, FragmentBuilder, FragmentError, build_filter_fragment,
    build_update_fragment,
};
#[cfg(feature = "json")]
pub use crate::json::UnsupportedJsonValue;
pub use crate::value::SqlValue;
