//! Fragment：把有序的字段值映射编译为 `SET` 赋值列表或 `WHERE` 条件列表，
//! 同时收集与 `$n` 占位符一一对应的参数值。
//!
//! ```
//! use halo_fragment::{build_update_fragment, field_values};
//!
//! let data = field_values! { "firstName" => "Aliya", "age" => 32 };
//! let frag = build_update_fragment(&data, &[("firstName", "first_name")]).unwrap();
//! let sql = format!(
//!     "UPDATE users SET {} WHERE id = {}",
//!     frag.set_cols,
//!     frag.next_placeholder().unwrap()
//! );
//! ```

use crate::field_mapper::{ColumnMapping, resolve_column};
use crate::field_values::FieldValues;
use crate::flavor::{Flavor, default_flavor};
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;

/// 过滤条件中需要包装成 `%value%` 的默认字段名。
pub const DEFAULT_PATTERN_KEY: &str = "nameLike";

/// 片段构建错误。所有变体都属于调用方输入错误（HTTP 400）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    /// 字段值映射为空：没有字段的 UPDATE/WHERE 没有意义。
    #[error("No data")]
    EmptyInput,
    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
    #[error("unsupported value for field {field}: {kind}")]
    UnsupportedValue { field: String, kind: &'static str },
    /// 起始编号加上参数个数超出 `usize`，无法生成连续的占位符。
    #[error("placeholder index overflow: base {base} with {count} values")]
    PlaceholderOverflow { base: usize, count: usize },
}

impl FragmentError {
    pub fn status_code(&self) -> u16 {
        400
    }

    pub fn is_bad_request(&self) -> bool {
        self.status_code() == 400
    }
}

/// 构建结果：可直接拼入更大 SQL 模板的片段及其参数。
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// 赋值列表（`"a"=$1, "b"=$2`）或条件列表（`a >= $1 AND b <= $2`）。
    pub set_cols: String,
    /// 与占位符按位置对齐的参数值。
    pub values: Vec<SqlValue>,
    flavor: Flavor,
    index_base: usize,
}

impl Fragment {
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// 第一个占位符的编号。
    pub fn index_base(&self) -> usize {
        self.index_base
    }

    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// 下一个参数将使用的占位符，例如两个值之后是 `$3`。
    pub fn next_placeholder(&self) -> Result<String, FragmentError> {
        let count = self.values.len();
        self.index_base
            .checked_add(count)
            .map(|idx| self.flavor.placeholder(idx))
            .ok_or(FragmentError::PlaceholderOverflow {
                base: self.index_base,
                count: count + 1,
            })
    }

    /// 追加一个参数值并返回它的占位符（用于拼接 `WHERE handle = $n`）。
    pub fn push_value(&mut self, value: impl Into<SqlValue>) -> Result<String, FragmentError> {
        let ph = self.next_placeholder()?;
        self.values.push(value.into());
        Ok(ph)
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.set_cols, self.values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Update,
    Filter,
}

impl FragmentKind {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn name(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Filter => "filter",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::Update => ", ",
            Self::Filter => " AND ",
        }
    }
}

/// 可配置的片段构建器：方言、起始占位符编号、LIKE 模式字段。
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    flavor: Flavor,
    index_base: usize,
    pattern_key: Option<String>,
}

impl Default for FragmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentBuilder {
    /// 使用全局默认 flavor、起始编号 1、模式字段 `nameLike`。
    pub fn new() -> Self {
        Self {
            flavor: default_flavor(),
            index_base: 1,
            pattern_key: Some(DEFAULT_PATTERN_KEY.to_string()),
        }
    }

    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.flavor = flavor;
        self
    }

    /// 第一个占位符的编号；0 按 1 处理。
    pub fn index_base(&mut self, base: usize) -> &mut Self {
        self.index_base = base.max(1);
        self
    }

    pub fn pattern_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.pattern_key = Some(key.into());
        self
    }

    pub fn no_pattern_key(&mut self) -> &mut Self {
        self.pattern_key = None;
        self
    }

    /// 生成 `"<column>"=$i` 赋值列表，以 `", "` 连接。
    pub fn build_update<M>(
        &self,
        data: &FieldValues,
        columns: &M,
    ) -> Result<Fragment, FragmentError>
    where
        M: ColumnMapping + ?Sized,
    {
        self.compile(FragmentKind::Update, data, columns)
    }

    /// 生成 `<column-expr> $i` 条件列表，以 `" AND "` 连接。
    ///
    /// 列表达式需自带比较运算符（如 `num_employees >=`）。模式字段的值会在
    /// 输出参数中包装为 `%value%`，`data` 本身不会被修改。
    pub fn build_filter<M>(
        &self,
        data: &FieldValues,
        columns: &M,
    ) -> Result<Fragment, FragmentError>
    where
        M: ColumnMapping + ?Sized,
    {
        self.compile(FragmentKind::Filter, data, columns)
    }

    fn compile<M>(
        &self,
        kind: FragmentKind,
        data: &FieldValues,
        columns: &M,
    ) -> Result<Fragment, FragmentError>
    where
        M: ColumnMapping + ?Sized,
    {
        if data.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(kind = kind.name(), "rejecting sql fragment without fields");
            return Err(FragmentError::EmptyInput);
        }

        if self.index_base.checked_add(data.len() - 1).is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                kind = kind.name(),
                index_base = self.index_base,
                fields = data.len(),
                "rejecting sql fragment with overflowing placeholder index"
            );
            return Err(FragmentError::PlaceholderOverflow {
                base: self.index_base,
                count: data.len(),
            });
        }

        let mut buf = StringBuilder::with_capacity(data.len() * 24);
        let mut values = Vec::with_capacity(data.len());

        for (i, (field, value)) in data.iter().enumerate() {
            let column = resolve_column(columns, field);
            let placeholder = self.flavor.placeholder(self.index_base + i);
            let clause = match kind {
                FragmentKind::Update => format!("{}={placeholder}", self.flavor.quote(&column)),
                FragmentKind::Filter => format!("{column} {placeholder}"),
            };
            buf.write_separated(kind.separator(), &clause);

            let value = match &self.pattern_key {
                Some(key) if kind == FragmentKind::Filter && key == field => {
                    value.to_like_pattern()
                }
                _ => value.clone(),
            };
            values.push(value);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            kind = kind.name(),
            fields = data.len(),
            flavor = %self.flavor,
            index_base = self.index_base,
            "built sql fragment"
        );

        Ok(Fragment {
            set_cols: buf.into_string(),
            values,
            flavor: self.flavor,
            index_base: self.index_base,
        })
    }
}

/// 构建 `UPDATE ... SET` 用的赋值片段（默认配置）。
///
/// `data` 为空时返回 [`FragmentError::EmptyInput`]。
pub fn build_update_fragment<M>(data: &FieldValues, columns: &M) -> Result<Fragment, FragmentError>
where
    M: ColumnMapping + ?Sized,
{
    FragmentBuilder::new().build_update(data, columns)
}

/// 构建 `WHERE` 用的条件片段（默认配置，模式字段为 `nameLike`）。
///
/// `data` 为空时返回 [`FragmentError::EmptyInput`]。
pub fn build_filter_fragment<M>(data: &FieldValues, columns: &M) -> Result<Fragment, FragmentError>
where
    M: ColumnMapping + ?Sized,
{
    FragmentBuilder::new().build_filter(data, columns)
}
