//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::time::Duration;

use crate::error::ClientError;

/// 再接続の初回待機時間
pub const INITIAL_RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// 再接続の待機時間の上限
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that ended the session
/// * `consecutive_failures` - Failures in a row, including this one
/// * `max_attempts` - The maximum number of consecutive failures allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    consecutive_failures: u32,
    max_attempts: u32,
) -> bool {
    // 入力や API のエラーでセッションが終わることはない
    if !matches!(
        error,
        ClientError::ConnectionError(_) | ClientError::ConnectionLost(_)
    ) {
        return false;
    }

    consecutive_failures < max_attempts
}

/// Delay before the next reconnection attempt (exponential backoff).
///
/// 1s, 2s, 4s, ... capped at 30s. `attempt` is 0-indexed.
pub fn reconnect_delay(attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    INITIAL_RECONNECT_DELAY
        .saturating_mul(factor)
        .min(MAX_RECONNECT_DELAY)
}
