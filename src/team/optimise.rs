use super::{SortKey, TeamContainer};
use crate::errors::{TeamError, TeamResult};
use crate::monster::MonsterInstance;

#[derive(Debug, Clone)]
struct Keyed {
    key: i64,
    monster: MonsterInstance,
}

/// Sorted-list team: the member with the highest key comes out first.
///
/// Keys are read once, when a monster is added, and stored with the sign of
/// the current orientation. `special` flips the orientation by negating the
/// stored keys; it never re-reads the monsters.
#[derive(Debug, Clone)]
pub struct OptimiseTeam {
    members: Vec<Keyed>, // ascending by key, next out at the end
    sort_key: SortKey,
    descending: bool,
    capacity: usize,
}

impl OptimiseTeam {
    pub fn new(sort_key: SortKey, capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            sort_key,
            descending: false,
            capacity,
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// True once `special` has flipped the team an odd number of times.
    pub fn is_descending(&self) -> bool {
        self.descending
    }

    fn sign(&self) -> i64 {
        if self.descending {
            -1
        } else {
            1
        }
    }
}

impl TeamContainer for OptimiseTeam {
    fn add(&mut self, monster: MonsterInstance) -> TeamResult<()> {
        if self.is_full() {
            return Err(TeamError::Capacity {
                limit: self.capacity,
            });
        }
        let key = self.sign() * self.sort_key.value_of(&monster);
        // Equal keys go below the existing ones, so earlier members come out first.
        let position = self.members.partition_point(|member| member.key < key);
        self.members.insert(position, Keyed { key, monster });
        Ok(())
    }

    fn retrieve(&mut self) -> TeamResult<MonsterInstance> {
        self.members
            .pop()
            .map(|member| member.monster)
            .ok_or(TeamError::Empty)
    }

    fn special(&mut self) {
        for member in &mut self.members {
            member.key = -member.key;
        }
        self.members.reverse();
        self.descending = !self.descending;
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot_order(&self) -> Vec<&MonsterInstance> {
        self.members.iter().rev().map(|member| &member.monster).collect()
    }

    fn clear(&mut self) {
        self.members.clear();
        self.descending = false;
    }
}
