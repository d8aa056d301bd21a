//! 入力中シグナルの送信状態
//!
//! 受信側は `false` が届くまで「入力中」を表示し続けるため、
//! `true` を送った後は必ずどこかで `false` を送る。
//! 明示的な停止がなくても、最後の `true` から一定時間で停止扱いにする。

use std::time::Duration;

use parley_shared::protocol::ClientEvent;
use tokio::time::Instant;

/// 入力中の状態を自動で解除するまでの時間
pub const TYPING_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct TypingTracker {
    /// 入力中を通知している相手と、自動停止の期限
    active: Option<(String, Instant)>,
}

impl TypingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力中を開始し、送るべきイベントを返す
    ///
    /// 同じ相手への再通知は期限の延長だけで、`true` は重ねて送らない。
    /// 別の相手に切り替わる場合は先に前の相手へ `false` を送る。
    pub fn start(&mut self, recipient_id: &str, now: Instant) -> Vec<ClientEvent> {
        let already_active = matches!(
            &self.active,
            Some((current, _)) if current == recipient_id
        );

        let mut events = Vec::new();
        if !already_active {
            events.extend(self.stop());
            events.push(typing_event(recipient_id.to_string(), true));
        }
        self.active = Some((recipient_id.to_string(), now + TYPING_IDLE_TIMEOUT));
        events
    }

    /// 入力中であれば停止し、`false` のイベントを返す
    pub fn stop(&mut self) -> Option<ClientEvent> {
        self.active
            .take()
            .map(|(recipient_id, _)| typing_event(recipient_id, false))
    }

    /// 期限を過ぎていれば停止する
    pub fn expire(&mut self, now: Instant) -> Option<ClientEvent> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.stop(),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|(_, deadline)| *deadline)
    }
}

fn typing_event(recipient_id: String, is_typing: bool) -> ClientEvent {
    ClientEvent::Typing {
        recipient_id,
        is_typing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_stop_emits_true_then_false() {
        // テスト項目: 開始で true、停止で false が 1 回ずつ出る
        // given (前提条件):
        let mut tracker = TypingTracker::new();
        let now = Instant::now();

        // when (操作):
        let started = tracker.start("u2", now);
        let stopped = tracker.stop();

        // then (期待する結果):
        assert_eq!(started, vec![typing_event("u2".to_string(), true)]);
        assert_eq!(stopped, Some(typing_event("u2".to_string(), false)));
        assert_eq!(tracker.stop(), None);
        assert_eq!(tracker.deadline(), None);
    }

    #[test]
    fn test_restart_for_same_recipient_only_extends_deadline() {
        // テスト項目: 同じ相手への再開始は true を重ねず、期限だけ延びる
        // given (前提条件):
        let mut tracker = TypingTracker::new();
        let now = Instant::now();
        tracker.start("u2", now);

        // when (操作):
        let later = now + Duration::from_secs(2);
        let events = tracker.start("u2", later);

        // then (期待する結果):
        assert!(events.is_empty());
        assert_eq!(tracker.deadline(), Some(later + TYPING_IDLE_TIMEOUT));
    }

    #[test]
    fn test_switching_recipient_stops_previous_first() {
        // テスト項目: 別の相手に切り替えると前の相手への false が先に出る
        // given (前提条件):
        let mut tracker = TypingTracker::new();
        let now = Instant::now();
        tracker.start("u2", now);

        // when (操作):
        let events = tracker.start("u3", now);

        // then (期待する結果):
        assert_eq!(
            events,
            vec![
                typing_event("u2".to_string(), false),
                typing_event("u3".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_expire_only_after_idle_timeout() {
        // テスト項目: 最後の開始から一定時間が経つまでは停止しない
        // given (前提条件):
        let mut tracker = TypingTracker::new();
        let now = Instant::now();
        tracker.start("u2", now);

        // when (操作):
        let early = tracker.expire(now + TYPING_IDLE_TIMEOUT - Duration::from_millis(1));
        let due = tracker.expire(now + TYPING_IDLE_TIMEOUT);

        // then (期待する結果):
        assert_eq!(early, None);
        assert_eq!(due, Some(typing_event("u2".to_string(), false)));
        assert_eq!(tracker.deadline(), None);
    }
}
