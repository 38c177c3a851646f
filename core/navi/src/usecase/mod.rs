//! ユースケース（ポート経由でのみ I/O を行う）

pub mod pipeline;
