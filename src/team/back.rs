use super::TeamContainer;
use crate::errors::{TeamError, TeamResult};
use crate::monster::MonsterInstance;
use std::collections::VecDeque;

/// Queue-backed team: monsters come out in the order they went in.
#[derive(Debug, Clone)]
pub struct BackTeam {
    members: VecDeque<MonsterInstance>,
    capacity: usize,
}

impl BackTeam {
    pub fn new(capacity: usize) -> Self {
        Self {
            members: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
}

impl TeamContainer for BackTeam {
    fn add(&mut self, monster: MonsterInstance) -> TeamResult<()> {
        if self.is_full() {
            return Err(TeamError::Capacity {
                limit: self.capacity,
            });
        }
        self.members.push_back(monster);
        Ok(())
    }

    fn retrieve(&mut self) -> TeamResult<MonsterInstance> {
        self.members.pop_front().ok_or(TeamError::Empty)
    }

    /// Move the back half (which holds the middle monster on odd sizes) in
    /// front of the front half, reversing the back half on the way.
    fn special(&mut self) {
        let half = self.members.len() / 2;
        let back_len = self.members.len() - half;
        self.members.rotate_left(half);
        self.members.make_contiguous()[..back_len].reverse();
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot_order(&self) -> Vec<&MonsterInstance> {
        self.members.iter().collect()
    }

    fn clear(&mut self) {
        self.members.clear();
    }
}
