// ABOUTME: Profile storage abstraction - trait seam plus in-memory implementation
// ABOUTME: The engine depends only on the trait, never on a process-global table
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Profile Storage
//!
//! The store owns all mutable per-user state. It guarantees per-key atomicity:
//! mutations for one chat id never race with mutations for another, and every
//! mutation is visible to subsequent reads from any concurrent caller.
//! Profiles are created lazily with the documented default goals and are never
//! deleted.

pub mod memory;

pub use memory::MemoryProfileStore;

use crate::errors::AppResult;
use crate::models::{LedgerField, OnboardingRecord, UserProfile};

/// Storage seam for per-user profiles and daily ledgers
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `chat_id`, creating it with default goals
    /// (2000 ml / 2000 kcal, empty ledgers) if absent. Returns a snapshot.
    fn get_or_create(&self, chat_id: i64) -> UserProfile;

    /// Overwrite the profile's attributes and goals from a completed
    /// onboarding and reset the three ledger accumulators to zero.
    /// Atomic from the caller's point of view.
    fn commit_onboarding(&self, chat_id: i64, record: OnboardingRecord) -> UserProfile;

    /// Add a strictly positive `delta` to one ledger field, creating the
    /// profile with defaults first if absent. Returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive or non-finite delta; the
    /// profile is left untouched.
    fn apply_ledger_delta(
        &self,
        chat_id: i64,
        field: LedgerField,
        delta: f64,
    ) -> AppResult<UserProfile>;
}
