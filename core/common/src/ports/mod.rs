//! Ports & Adapters のポート定義
//!
//! - inbound: なし（common はライブラリのためアプリの入り口を持たない）
//! - outbound: navi が外界（ファイル・時刻・環境変数・HTTP・ログ）を使うための trait

pub mod outbound;
