//! FieldValues：按插入顺序保存的 字段名 -> 值 映射。

use crate::value::SqlValue;
use indexmap::IndexMap;

/// 有序的字段值映射。插入顺序决定占位符编号。
///
/// 重复插入同名字段会原位替换值，保持该字段第一次出现的位置
/// （与 JSON 对象的 key 语义一致）。
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    entries: IndexMap<String, SqlValue>,
}

/// 顺序敏感的相等：同样的字段、不同的顺序会得到不同的占位符编号。
impl PartialEq for FieldValues {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(n),
        }
    }

    /// 插入或替换一个字段，返回被替换的旧值。
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<SqlValue>,
    ) -> Option<SqlValue> {
        self.entries.insert(field.into(), value.into())
    }

    /// 链式插入，便于在测试或调用方里内联构造。
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// 移除一个字段，后续字段的位置前移。
    pub fn remove(&mut self, field: &str) -> Option<SqlValue> {
        self.entries.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.entries.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.values()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<K, V> Extend<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FieldValues
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from(v: [(K, V); N]) -> Self {
        v.into_iter().collect()
    }
}

impl IntoIterator for FieldValues {
    type Item = (String, SqlValue);
    type IntoIter = indexmap::map::IntoIter<String, SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
