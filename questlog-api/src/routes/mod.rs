/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `pages`: Landing page and main view payloads
/// - `auth`: Account endpoints (register, login, logout)
/// - `tasks`: Task creation and completion
/// - `friendships`: Friend request send/accept/decline
/// - `ranking`: Global XP leaderboard
/// - `music`: Profile music preferences

pub mod auth;
pub mod friendships;
pub mod health;
pub mod music;
pub mod pages;
pub mod ranking;
pub mod tasks;
