//! Binds authenticated users to a live session id and routes outbound
//! events to sessions, games, or spectator rooms. Generalizes the teacher's
//! single `game_id -> senders` `GameRegistry` into the three maps the spec's
//! Session Router needs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::ws::events::ServerEvent;

pub type WsSender = mpsc::UnboundedSender<ServerEvent>;

#[derive(Debug, Default)]
struct Room {
    participants: HashSet<i64>,
    spectators: Vec<WsSender>,
}

#[derive(Clone)]
pub struct SessionRouter {
    user_sessions: Arc<RwLock<HashMap<i64, String>>>,
    session_senders: Arc<RwLock<HashMap<String, WsSender>>>,
    game_rooms: Arc<RwLock<HashMap<i64, Room>>>,
}

pub enum Target {
    Session(String),
    User(i64),
    GameRoom(i64),
}

impl SessionRouter {
    pub fn new() -> Self {
        SessionRouter {
            user_sessions: Arc::new(RwLock::new(HashMap::new())),
            session_senders: Arc::new(RwLock::new(HashMap::new())),
            game_rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a new session for `user_id`. If another session was already
    /// live for this user, emits `logged_twice` to it and drops its binding
    /// — the write lock is held only across the map mutation, never across
    /// the send.
    pub async fn bind_session(&self, user_id: i64, session_id: String, sender: WsSender) {
        let previous_session = {
            let mut user_sessions = self.user_sessions.write().await;
            let mut senders = self.session_senders.write().await;
            senders.insert(session_id.clone(), sender);
            user_sessions.insert(user_id, session_id)
        };

        if let Some(old_sid) = previous_session {
            let old_sender = {
                let mut senders = self.session_senders.write().await;
                senders.remove(&old_sid)
            };
            if let Some(old_sender) = old_sender {
                let _ = old_sender.send(ServerEvent::LoggedTwice);
            }
        }
    }

    /// Looks up the raw sender bound to a session, for callers that need to
    /// hand it to `join_room` directly rather than routing through a target.
    pub async fn sender_for_session(&self, session_id: &str) -> Option<WsSender> {
        self.session_senders.read().await.get(session_id).cloned()
    }

    pub async fn unbind_session(&self, user_id: i64, session_id: &str) {
        let mut user_sessions = self.user_sessions.write().await;
        if user_sessions.get(&user_id).map(String::as_str) == Some(session_id) {
            user_sessions.remove(&user_id);
        }
        drop(user_sessions);
        let mut senders = self.session_senders.write().await;
        senders.remove(session_id);
    }

    pub async fn join_room(&self, game_id: i64, user_id: i64, is_participant: bool, sender: Option<WsSender>) {
        let mut rooms = self.game_rooms.write().await;
        let room = rooms.entry(game_id).or_default();
        if is_participant {
            room.participants.insert(user_id);
        }
        if let Some(sender) = sender {
            room.spectators.push(sender);
        }
    }

    pub async fn leave_room(&self, game_id: i64, sender: &WsSender) {
        let mut rooms = self.game_rooms.write().await;
        if let Some(room) = rooms.get_mut(&game_id) {
            room.spectators.retain(|s| !s.same_channel(sender));
        }
    }

    /// Fire-and-forget: never awaited against a held lock by callers, so a
    /// slow or dead receiver never blocks an engine operation.
    pub async fn emit(&self, target: Target, event: ServerEvent) {
        match target {
            Target::Session(sid) => {
                let senders = self.session_senders.read().await;
                if let Some(sender) = senders.get(&sid) {
                    let _ = sender.send(event);
                }
            }
            Target::User(user_id) => {
                let sid = {
                    let user_sessions = self.user_sessions.read().await;
                    user_sessions.get(&user_id).cloned()
                };
                if let Some(sid) = sid {
                    let senders = self.session_senders.read().await;
                    if let Some(sender) = senders.get(&sid) {
                        let _ = sender.send(event);
                    }
                }
            }
            Target::GameRoom(game_id) => {
                let rooms = self.game_rooms.read().await;
                if let Some(room) = rooms.get(&game_id) {
                    for sender in &room.spectators {
                        let _ = sender.send(event.clone());
                    }
                }
            }
        }
    }
}
