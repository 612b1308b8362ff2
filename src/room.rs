//! Room registry: one match authority per room.
//!
//! Rooms live in a `DashMap` so lookups for different rooms never contend. Each
//! room sits behind its own `parking_lot::Mutex`, which is what serializes the
//! intents for that table. A room is only locked after its `Arc` has been cloned
//! out of the map, so no map guard is held while a room is locked.
//!
//! The last seat leaving marks the room closed under its lock before the entry is
//! removed. A join that raced the removal finds the flag and is refused.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::game::{MatchController, TimerEvent};
use crate::intent::Intent;
use crate::seat::{Seat, SEATS};
use crate::snapshot::{MatchSnapshot, SeatView};
use crate::state::Phase;
use crate::timer::{Clock, SystemClock};

const ROOM_ID_MAX: u32 = 999_999;
const ROOM_ID_DIGITS: usize = 6;

/// Six-digit room number, leading zeros allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(u32);

impl RoomId {
    pub fn new(id: u32) -> Option<Self> {
        (id <= ROOM_ID_MAX).then_some(RoomId(id))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() != ROOM_ID_DIGITS || !t.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RoomError::BadRoomId(s.to_string()));
        }
        t.parse::<u32>()
            .ok()
            .and_then(RoomId::new)
            .ok_or_else(|| RoomError::BadRoomId(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoomError {
    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),
    #[error("room {0} already has three players")]
    Full(RoomId),
    #[error("{seat} is not seated in room {room}")]
    NotSeated { room: RoomId, seat: Seat },
    #[error("'{0}' is not a six-digit room number")]
    BadRoomId(String),
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Where a joining player ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub room_id: RoomId,
    pub seat: Seat,
}

#[derive(Debug)]
pub struct Room {
    id: RoomId,
    controller: MatchController,
    occupied: [bool; SEATS],
    closed: bool,
}

impl Room {
    fn new(id: RoomId, controller: MatchController) -> Self {
        Self { id, controller, occupied: [false; SEATS], closed: false }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn seated(&self) -> usize {
        self.occupied.iter().filter(|o| **o).count()
    }

    pub fn is_full(&self) -> bool {
        self.seated() == SEATS
    }

    pub fn is_seated(&self, seat: Seat) -> bool {
        self.occupied[seat.index()]
    }

    /// Take the lowest free seat. The first hand is dealt when the table fills.
    fn take_seat(&mut self) -> Result<Seat, RoomError> {
        if self.closed {
            return Err(RoomError::UnknownRoom(self.id));
        }
        let seat = Seat::ALL
            .into_iter()
            .find(|s| !self.occupied[s.index()])
            .ok_or(RoomError::Full(self.id))?;
        self.occupied[seat.index()] = true;
        if self.is_full() && self.controller.phase() == Phase::Dealing {
            self.controller.start_hand();
        }
        Ok(seat)
    }
}

/// All live rooms of one process.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<Mutex<Room>>>,
    config: MatchConfig,
    clock: Arc<dyn Clock>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl RoomRegistry {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: MatchConfig, clock: Arc<dyn Clock>) -> Self {
        Self { rooms: DashMap::new(), config, clock }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn room(&self, id: RoomId) -> Result<Arc<Mutex<Room>>, RoomError> {
        self.rooms.get(&id).map(|r| Arc::clone(r.value())).ok_or(RoomError::UnknownRoom(id))
    }

    /// Match config for one room. A fixed seed is offset by the room number so
    /// that no two rooms deal the same cards.
    fn room_config(&self, id: RoomId) -> MatchConfig {
        let mut config = self.config.clone();
        config.seed = config.seed.map(|seed| seed.wrapping_add(u64::from(id.get())));
        config
    }

    /// Open an empty room under a fresh random number.
    pub fn create_room(&self) -> RoomId {
        let mut rng = rand::rng();
        loop {
            let id = RoomId(rng.random_range(0..=ROOM_ID_MAX));
            if let Entry::Vacant(slot) = self.rooms.entry(id) {
                let controller = MatchController::with_clock(self.room_config(id), Arc::clone(&self.clock));
                slot.insert(Arc::new(Mutex::new(Room::new(id, controller))));
                info!(room = %id, "room created");
                return id;
            }
        }
    }

    pub fn join(&self, id: RoomId) -> Result<SeatAssignment, RoomError> {
        let room = self.room(id)?;
        let seat = room.lock().take_seat()?;
        info!(room = %id, %seat, "seat taken");
        Ok(SeatAssignment { room_id: id, seat })
    }

    /// Join the first room with a free seat, or open a new one.
    pub fn quick_match(&self) -> SeatAssignment {
        let mut rooms: Vec<(RoomId, Arc<Mutex<Room>>)> =
            self.rooms.iter().map(|r| (*r.key(), Arc::clone(r.value()))).collect();
        rooms.sort_by_key(|(id, _)| *id);
        let candidates: Vec<RoomId> = rooms
            .into_iter()
            .filter(|(_, room)| {
                let guard = room.lock();
                !guard.closed && !guard.is_full()
            })
            .map(|(id, _)| id)
            .collect();
        for id in candidates {
            if let Ok(assignment) = self.join(id) {
                return assignment;
            }
        }
        loop {
            let id = self.create_room();
            if let Ok(assignment) = self.join(id) {
                return assignment;
            }
        }
    }

    /// Free a seat. The match keeps running on timers; an empty room is closed.
    pub fn leave(&self, id: RoomId, seat: Seat) -> Result<(), RoomError> {
        let room = self.room(id)?;
        let now_empty = {
            let mut guard = room.lock();
            if !guard.is_seated(seat) {
                return Err(RoomError::NotSeated { room: id, seat });
            }
            guard.occupied[seat.index()] = false;
            guard.closed = guard.seated() == 0;
            guard.closed
        };
        info!(room = %id, %seat, "seat left");
        if now_empty {
            self.rooms.remove_if(&id, |_, r| Arc::ptr_eq(r, &room));
            info!(room = %id, "room closed");
        }
        Ok(())
    }

    /// Apply one authenticated intent and return that seat's view of the result.
    pub fn submit(&self, id: RoomId, seat: Seat, intent: &Intent) -> Result<SeatView, RoomError> {
        let room = self.room(id)?;
        let mut guard = room.lock();
        if !guard.is_seated(seat) {
            return Err(RoomError::NotSeated { room: id, seat });
        }
        guard.controller.apply(seat, intent)?;
        debug!(room = %id, %seat, intent = intent.label(), "intent applied");
        Ok(guard.controller.view_for(seat))
    }

    pub fn view(&self, id: RoomId, seat: Seat) -> Result<SeatView, RoomError> {
        let room = self.room(id)?;
        let guard = room.lock();
        Ok(guard.controller.view_for(seat))
    }

    pub fn snapshot(&self, id: RoomId) -> Result<MatchSnapshot, RoomError> {
        let room = self.room(id)?;
        let guard = room.lock();
        Ok(guard.controller.snapshot())
    }

    /// Fire expired timers in every room. Returns what happened, per room.
    pub fn tick_all(&self) -> Vec<(RoomId, TimerEvent)> {
        let rooms: Vec<(RoomId, Arc<Mutex<Room>>)> =
            self.rooms.iter().map(|r| (*r.key(), Arc::clone(r.value()))).collect();
        rooms
            .into_iter()
            .filter_map(|(id, room)| room.lock().controller.tick().map(|ev| (id, ev)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_ids_are_six_digits() {
        assert_eq!("123456".parse::<RoomId>().map(RoomId::get), Ok(123_456));
        assert_eq!("012345".parse::<RoomId>().map(|r| r.to_string()), Ok("012345".to_string()));
        assert_eq!("000000".parse::<RoomId>().map(RoomId::get), Ok(0));
        assert!("12345".parse::<RoomId>().is_err());
        assert!("+12345".parse::<RoomId>().is_err());
        assert!(RoomId::new(1_000_000).is_none());
        assert!("abcdef".parse::<RoomId>().is_err());
        assert_eq!(RoomId::new(42).map(|r| r.to_string()), Some("000042".to_string()));
    }

    #[test]
    fn third_join_deals_and_fourth_is_refused() {
        let reg = RoomRegistry::new(MatchConfig::default().with_seed(3));
        let id = reg.create_room();
        for expected in Seat::ALL {
            assert_eq!(reg.join(id).map(|a| a.seat), Ok(expected));
        }
        assert_eq!(reg.join(id), Err(RoomError::Full(id)));
        assert_eq!(reg.snapshot(id).map(|s| s.phase), Ok(Phase::Bidding));
    }

    #[test]
    fn empty_room_is_closed_on_last_leave() {
        let reg = RoomRegistry::default();
        let a = reg.quick_match();
        assert_eq!(a.seat, Seat::ALL[0]);
        reg.leave(a.room_id, a.seat).unwrap();
        assert!(reg.is_empty());
        assert_eq!(reg.join(a.room_id), Err(RoomError::UnknownRoom(a.room_id)));
    }

    #[test]
    fn join_holding_a_room_closed_by_the_last_leave_is_refused() {
        let reg = RoomRegistry::default();
        let a = reg.quick_match();
        // A joiner that fetched the room just before the last occupant left.
        let room = reg.room(a.room_id).unwrap();
        reg.leave(a.room_id, a.seat).unwrap();
        assert!(reg.is_empty());
        assert_eq!(room.lock().take_seat(), Err(RoomError::UnknownRoom(a.room_id)));
        assert_eq!(room.lock().seated(), 0);
    }

    #[test]
    fn seeded_rooms_get_distinct_seeds() {
        let reg = RoomRegistry::new(MatchConfig::default().with_seed(7));
        let a = RoomId::new(1).unwrap();
        let b = RoomId::new(2).unwrap();
        assert_eq!(reg.room_config(a).seed, Some(8));
        assert_ne!(reg.room_config(a).seed, reg.room_config(b).seed);
        assert_eq!(RoomRegistry::default().room_config(a).seed, None);
    }
}
