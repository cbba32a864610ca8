//! 片段拼接用的字符串工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            buf: String::with_capacity(n),
        }
    }

    /// 写入 `s`；如果不是首次写入，会先写入分隔符 `sep`。
    pub(crate) fn write_separated(&mut self, sep: &str, s: &str) {
        if !self.buf.is_empty() {
            self.buf.push_str(sep);
        }
        self.buf.push_str(s);
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
