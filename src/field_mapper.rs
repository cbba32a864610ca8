//! Field mapper：把逻辑字段名解析为物理列名（或过滤用的列表达式）。

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::{Arc, OnceLock};

/// 字段名 -> 列名 的映射。
///
/// 映射条目是可选的：`column_for` 返回 `None` 时调用方会退回到字段名本身，
/// 见 [`resolve_column`]。
pub trait ColumnMapping {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>>;
}

/// 显式的 get-with-default：有映射用映射，否则用字段名本身。
///
/// 映射到空字符串的条目与“无映射”同等对待，不会生成 `""=$1` 这样的片段。
pub fn resolve_column<'a, M>(mapping: &'a M, field: &'a str) -> Cow<'a, str>
where
    M: ColumnMapping + ?Sized,
{
    match mapping.column_for(field) {
        Some(col) if !col.is_empty() => col,
        _ => Cow::Borrowed(field),
    }
}

impl<M: ColumnMapping + ?Sized> ColumnMapping for &M {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        (**self).column_for(field)
    }
}

/// 空映射：所有字段都使用字段名本身。
impl ColumnMapping for () {
    fn column_for(&self, _field: &str) -> Option<Cow<'_, str>> {
        None
    }
}

impl<K, V, S> ColumnMapping for HashMap<K, V, S>
where
    K: std::borrow::Borrow<str> + std::hash::Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V> ColumnMapping for BTreeMap<K, V>
where
    K: std::borrow::Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

fn lookup_pairs<'a, K, V>(pairs: &'a [(K, V)], field: &str) -> Option<Cow<'a, str>>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == field)
        .map(|(_, v)| Cow::Borrowed(v.as_ref()))
}

impl<K: AsRef<str>, V: AsRef<str>> ColumnMapping for [(K, V)] {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        lookup_pairs(self, field)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> ColumnMapping for [(K, V); N] {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        lookup_pairs(self, field)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ColumnMapping for Vec<(K, V)> {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        lookup_pairs(self, field)
    }
}

/// 字段名映射函数类型：按规则把任意字段名转成列名。
pub type FieldMapperFunc = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;

impl ColumnMapping for FieldMapperFunc {
    fn column_for(&self, field: &str) -> Option<Cow<'_, str>> {
        Some(Cow::Owned((**self)(field)))
    }
}

fn identity_impl(s: &str) -> String {
    s.to_string()
}

static IDENTITY_MAPPER: OnceLock<FieldMapperFunc> = OnceLock::new();

/// 恒等 mapper。
pub fn identity_mapper() -> FieldMapperFunc {
    IDENTITY_MAPPER
        .get_or_init(|| Arc::new(identity_impl))
        .clone()
}

fn convert_with_separator(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut prev: Option<char> = None;
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();

        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                let prev_is_lower_or_digit = p.is_ascii_lowercase() || p.is_ascii_digit();
                let prev_is_upper = p.is_ascii_uppercase();
                let next_is_lower = next.map(|n| n.is_ascii_lowercase()).unwrap_or(false);

                if prev_is_lower_or_digit || (prev_is_upper && next_is_lower) {
                    out.push(sep);
                }
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }

        prev = Some(c);
    }

    out
}

/// `firstName` -> `first_name`。
///
/// 单词边界：`aB`、`a1B`，以及连续大写后接小写（`HTTPServer` -> `http_server`）。
pub fn snake_case_mapper(s: &str) -> String {
    convert_with_separator(s, '_')
}

/// `firstName` -> `first-name`。
pub fn kebab_case_mapper(s: &str) -> String {
    convert_with_separator(s, '-')
}

pub fn upper_case_mapper(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// 返回一个在列名前添加固定前缀的 mapper（例如表别名 `c.`）。
pub fn prefix_mapper(prefix: &'static str) -> FieldMapperFunc {
    Arc::new(move |name| format!("{prefix}{name}"))
}

pub fn suffix_mapper(suffix: &'static str) -> FieldMapperFunc {
    Arc::new(move |name| format!("{name}{suffix}"))
}

/// 把普通函数包装为 `FieldMapperFunc`，便于作为 `ColumnMapping` 传入。
pub fn mapper_fn(f: fn(&str) -> String) -> FieldMapperFunc {
    Arc::new(f)
}
