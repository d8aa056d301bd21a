//! 入力行のパース

use crate::error::ClientError;

/// クライアントのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/open <user>`: ダイレクトの会話を開く
    OpenDirect(String),
    /// `/group <group>`: グループの会話を開く
    OpenGroup(String),
    /// `/close`
    Close,
    /// `/online`
    Online,
    /// `/typing on|off`
    Typing(bool),
    /// `/unread`
    Unread,
    /// `/quit`
    Quit,
    /// 開いている会話へのテキスト送信
    Send(String),
}

impl Command {
    /// 1 行をコマンドとしてパースする。`/` で始まらない行はテキスト送信
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let line = line.trim();
        if !line.starts_with('/') {
            if line.is_empty() {
                return Err(ClientError::InvalidCommand("empty input".to_string()));
            }
            return Ok(Self::Send(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(ClientError::InvalidCommand(format!(
                "too many arguments: {}",
                line
            )));
        }

        match (name, arg) {
            ("/open", Some(user)) => Ok(Self::OpenDirect(user.to_string())),
            ("/group", Some(group)) => Ok(Self::OpenGroup(group.to_string())),
            ("/close", None) => Ok(Self::Close),
            ("/online", None) => Ok(Self::Online),
            ("/typing", Some("on")) => Ok(Self::Typing(true)),
            ("/typing", Some("off")) => Ok(Self::Typing(false)),
            ("/unread", None) => Ok(Self::Unread),
            ("/quit", None) => Ok(Self::Quit),
            _ => Err(ClientError::InvalidCommand(line.to_string())),
        }
    }
}

/// `/help` 相当の使い方
pub const USAGE: &str = "\
Commands:
  /open <user>     open a direct conversation
  /group <group>   open a group conversation
  /close           close the current conversation
  /online          list online users
  /typing on|off   tell the peer you are typing
  /unread          show unread counters
  /quit            exit
  <text>           send to the open conversation";
