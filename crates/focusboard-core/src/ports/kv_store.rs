//! KeyValueStore port - 永続化トランスポート
//!
//! ブラウザの localStorage のような「キー 1 つに文字列 1 つ」の保存先を抽象化します。
//! snapshot の形式は知りません（シリアライズは Persistence Adapter の責務）。
//!
//! # 実装
//! - InMemoryKeyValueStore: テスト・組み込み用
//! - FileKeyValueStore: キーごとに 1 ファイル

use crate::domain::StoreError;

/// KeyValueStore はテキスト値をキーで保存する
pub trait KeyValueStore: Send {
    /// 値を取得（存在しなければ `None`）
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 値を上書き保存
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// 値を削除（存在しなくてもエラーにしない）
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
