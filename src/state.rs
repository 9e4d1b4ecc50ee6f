/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - csrf: 起動時に一度だけ検証された CsrfGuard
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::csrf::CsrfGuard;

#[derive(Clone, Debug)]
pub struct AppState {
    pub csrf: Arc<CsrfGuard>,
}

impl AppState {
    pub fn new(csrf: Arc<CsrfGuard>) -> Self {
        Self { csrf }
    }
}
