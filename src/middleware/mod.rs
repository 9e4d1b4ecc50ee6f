/*
 * Responsibility
 * - middleware の公開インターフェース
 * - csrf: double-submit token の検証と発行
 * - cors / http: ブラウザ向けポリシーと横断的な HTTP 制御
 */
pub mod cors;
pub mod csrf;
pub mod http;
