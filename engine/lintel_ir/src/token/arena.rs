//! Slot arena for token nodes.
//!
//! Tokens are addressed by stable [`TokenId`] indices. Releasing a token
//! tombstones its slot and recycles the index through a free list; tearing
//! down a whole sequence is a single `clear`. No reachable link may ever
//! address a dead slot.

use super::{Token, TokenFlags, TokenId};
use crate::Name;

pub(crate) struct TokenArena {
    slots: Vec<Token>,
    /// Recycled slot indices.
    free: Vec<u32>,
    /// Number of live (non-tombstoned) slots.
    live: usize,
}

impl TokenArena {
    pub(crate) fn new() -> Self {
        TokenArena {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Allocate a slot for `token`, reusing a tombstoned slot if one exists.
    pub(crate) fn alloc(&mut self, token: Token) -> TokenId {
        self.live += 1;
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = token;
            return TokenId::from_raw(idx);
        }
        let idx = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("token arena exceeded {} slots", u32::MAX));
        self.slots.push(token);
        TokenId::from_raw(idx)
    }

    /// Borrow a live token.
    ///
    /// # Panics
    /// Panics if `id` is the sentinel or addresses a dead slot.
    #[inline]
    pub(crate) fn get(&self, id: TokenId) -> &Token {
        let tok = &self.slots[id.index()];
        debug_assert!(!tok.flags.contains(TokenFlags::DEAD), "access to freed token");
        tok
    }

    /// Mutably borrow a live token.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: TokenId) -> &mut Token {
        let tok = &mut self.slots[id.index()];
        debug_assert!(!tok.flags.contains(TokenFlags::DEAD), "access to freed token");
        tok
    }

    /// Check that `id` addresses a live slot without panicking.
    #[inline]
    pub(crate) fn is_live(&self, id: TokenId) -> bool {
        id.is_valid()
            && id.index() < self.slots.len()
            && !self.slots[id.index()].flags.contains(TokenFlags::DEAD)
    }

    /// Tombstone a slot and recycle its index.
    ///
    /// The caller is responsible for having unlinked the token first.
    pub(crate) fn release(&mut self, id: TokenId) {
        let tok = &mut self.slots[id.index()];
        debug_assert!(!tok.flags.contains(TokenFlags::DEAD), "double free of token");
        *tok = Token::new(Name::EMPTY, 0, 0, 0);
        tok.flags.set(TokenFlags::DEAD);
        self.free.push(id.raw());
        self.live -= 1;
    }

    /// Drop every slot. All outstanding `TokenId`s become invalid.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Number of live tokens.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
