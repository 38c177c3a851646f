//! navi 共通ライブラリ
//!
//! エラー型、Outbound ポートと標準アダプタ、LLM プロバイダ層を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLMプロバイダと profiles.json
pub mod llm;
