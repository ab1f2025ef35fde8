//! テスト用のモック

use super::NameSuggester;
use crate::error::{LabelerError, Result};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// 呼び出し順に用意した応答を返すモック
///
/// `None` の応答はAPIエラーとして返す。応答が尽きた場合もエラー。
#[derive(Debug, Default)]
pub struct MockSuggester {
    responses: RefCell<VecDeque<Option<String>>>,
    calls: Cell<usize>,
    mime_types: RefCell<Vec<String>>,
    reject_from: Option<usize>,
}

impl MockSuggester {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(|r| r.map(Into::into)).collect()),
            ..Default::default()
        }
    }

    /// 全て成功する応答列
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Some))
    }

    /// `n` 回目以降の呼び出しでAPIキー拒否を返す（0始まり）
    pub fn rejecting_key_from(mut self, n: usize) -> Self {
        self.reject_from = Some(n);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// 受け取ったMIMEタイプ（呼び出し順）
    pub fn mime_types(&self) -> Vec<String> {
        self.mime_types.borrow().clone()
    }
}

impl NameSuggester for MockSuggester {
    async fn suggest_name(&self, _image: &[u8], mime_type: &str) -> Result<String> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        self.mime_types.borrow_mut().push(mime_type.to_string());

        if self.reject_from.is_some_and(|n| call >= n) {
            return Err(LabelerError::InvalidApiKey("API key not valid".into()));
        }

        match self.responses.borrow_mut().pop_front() {
            Some(Some(name)) => Ok(name),
            Some(None) => Err(LabelerError::ApiCall("mock failure".into())),
            None => Err(LabelerError::ApiCall("no more mock responses".into())),
        }
    }
}
