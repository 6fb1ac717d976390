use super::TeamContainer;
use crate::errors::{TeamError, TeamResult};
use crate::monster::MonsterInstance;

/// Number of monsters nearest the top that `special` reverses.
const SPECIAL_DEPTH: usize = 3;

/// Stack-backed team: the last monster added is the next one out.
#[derive(Debug, Clone)]
pub struct FrontTeam {
    members: Vec<MonsterInstance>, // top of the stack is the end
    capacity: usize,
}

impl FrontTeam {
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }
}

impl TeamContainer for FrontTeam {
    fn add(&mut self, monster: MonsterInstance) -> TeamResult<()> {
        if self.is_full() {
            return Err(TeamError::Capacity {
                limit: self.capacity,
            });
        }
        self.members.push(monster);
        Ok(())
    }

    fn retrieve(&mut self) -> TeamResult<MonsterInstance> {
        self.members.pop().ok_or(TeamError::Empty)
    }

    /// Reverse the top three monsters (or fewer if the team is smaller).
    fn special(&mut self) {
        let depth = self.members.len().min(SPECIAL_DEPTH);
        let start = self.members.len() - depth;
        self.members[start..].reverse();
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot_order(&self) -> Vec<&MonsterInstance> {
        self.members.iter().rev().collect()
    }

    fn clear(&mut self) {
        self.members.clear();
    }
}
