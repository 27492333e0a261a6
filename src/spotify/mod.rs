//! # Spotify Endpoints
//!
//! The host-facing endpoints of the plugin. Each one accepts identifiers,
//! queries and optional `offset`/`limit`, calls the GraphQL client and
//! converts the answer into host objects.
//!
//! ```text
//! Host runtime
//!      ↓
//! SpotifyMetadataProviderPlugin
//!     ├── auth         web player session, TOTP token issuance, refresh timer
//!     ├── album        albums, album tracks, new releases, library
//!     ├── artist       artists, top tracks, discography, follow
//!     ├── browse       personalised home feed
//!     ├── playlist     playlists, playlist tracks, editing, follow
//!     ├── search       combined and per-kind search
//!     ├── track        tracks, library, radio
//!     ├── user         profile, library listings and lookups
//!     └── core_plugin  update check, scrobble, support text
//!      ↓
//! GqlClient (upstream)
//! ```
//!
//! ## Pagination
//!
//! Two envelope shapes are produced. Upstream pages that carry counters are
//! wrapped as they are (`hasMore` when `total > offset + items`). Lists the
//! upstream returns in full, such as top tracks or related artists, become a
//! single page with `hasMore = false`.
//!
//! Only [`auth`] and [`core_plugin`] perform their own HTTP calls; everything
//! else goes through the GraphQL client.

pub mod album;
pub mod artist;
pub mod auth;
pub mod browse;
pub mod core_plugin;
pub mod nuance;
pub mod playlist;
pub mod search;
pub mod track;
pub mod user;

pub use album::AlbumEndpoint;
pub use artist::ArtistEndpoint;
pub use auth::{AuthEndpoint, AuthEvent, AuthState, HostAuthEvent};
pub use browse::BrowseEndpoint;
pub use core_plugin::CorePlugin;
pub use playlist::PlaylistEndpoint;
pub use search::SearchEndpoint;
pub use track::TrackEndpoint;
pub use user::UserEndpoint;

use crate::gql::PageParams;

/// Page size when the host does not ask for one.
pub(crate) const DEFAULT_LIMIT: u32 = 50;

pub(crate) fn page(offset: Option<u32>, limit: Option<u32>, default_limit: u32) -> PageParams {
    PageParams::new(offset.unwrap_or(0), limit.unwrap_or(default_limit))
}
