use std::sync::Arc;

use crate::{
    Res, converter,
    gql::{GqlClient, HomeParams},
    host::TimeZoneProvider,
    types::{BrowseSectionItem, SpotubeBrowseSection, SpotubePaginationResponse},
};

use super::{AuthEndpoint, page};

const BROWSE_LIMIT: u32 = 20;
const SP_T_COOKIE: &str = "sp_t";

/// The personalised home feed. Needs the session's `sp_t` cookie and the
/// user's time zone on top of the access token.
pub struct BrowseEndpoint {
    client: Arc<dyn GqlClient>,
    auth: AuthEndpoint,
    timezone: Arc<dyn TimeZoneProvider>,
}

impl BrowseEndpoint {
    pub fn new(
        client: Arc<dyn GqlClient>,
        auth: AuthEndpoint,
        timezone: Arc<dyn TimeZoneProvider>,
    ) -> Self {
        Self {
            client,
            auth,
            timezone,
        }
    }

    async fn home_params(&self, offset: u32, limit: u32) -> Res<HomeParams> {
        Ok(HomeParams {
            time_zone: self.timezone.local_time_zone().await?,
            sp_t_cookie: self.auth.cookie(SP_T_COOKIE),
            offset,
            limit,
        })
    }

    /// All home sections in one page. The feed is not paged upstream, so
    /// `offset` is ignored and the envelope never reports more.
    pub async fn sections(
        &self,
        _offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeBrowseSection>> {
        let limit = limit.unwrap_or(BROWSE_LIMIT);
        let params = self.home_params(0, limit).await?;
        let sections = self.client.browse_home(params).await?;

        Ok(SpotubePaginationResponse {
            limit,
            next_offset: None,
            has_more: false,
            total: sections.len() as u32,
            items: sections.into_iter().map(converter::browse_section).collect(),
        })
    }

    /// One section's items, in upstream order.
    ///
    /// Items of an object type other than playlist, album or artist are
    /// dropped after the page counters are taken, so `items` can be shorter
    /// than the upstream page while `total` still counts them.
    pub async fn section_items(
        &self,
        id: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<BrowseSectionItem>> {
        let page = page(offset, limit, BROWSE_LIMIT);
        let params = self.home_params(page.offset, page.limit).await?;
        let data = self.client.browse_home_section(id, params).await?;

        let response = converter::paginated(data, converter::browse_item);
        let SpotubePaginationResponse {
            limit,
            next_offset,
            has_more,
            total,
            items,
        } = response;
        Ok(SpotubePaginationResponse {
            limit,
            next_offset,
            has_more,
            total,
            items: items.into_iter().flatten().collect(),
        })
    }
}
