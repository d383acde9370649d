//! Public-view links: building them for sharing and parsing them on load.

use url::form_urlencoded;

use crate::model::{OrgId, UserId};

pub const PUBLIC_VIEW_PAGE: &str = "public-view.html";

/// Query parameters of the public view page (`?userId=&orgId=`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PublicViewParams {
    pub user_id: UserId,
    pub org_id: Option<OrgId>,
}

impl PublicViewParams {
    pub fn new(user_id: UserId, org_id: Option<OrgId>) -> Self {
        Self { user_id, org_id }
    }

    /// Parses a query string with or without the leading `?`.
    ///
    /// A missing or malformed `userId` falls back to `fallback_user`; a
    /// malformed `orgId` is treated as absent.
    pub fn from_query(query: &str, fallback_user: UserId) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut user_id = None;
        let mut org_id = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "userId" => user_id = value.trim().parse().ok().map(UserId),
                "orgId" => org_id = value.trim().parse().ok().map(OrgId),
                _ => {}
            }
        }
        Self::new(user_id.unwrap_or(fallback_user), org_id)
    }

    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("userId", &self.user_id.to_string());
        if let Some(org) = self.org_id {
            query.append_pair("orgId", &org.to_string());
        }
        query.finish()
    }

    /// Page-relative link, e.g. `public-view.html?userId=3&orgId=12`.
    pub fn relative_link(&self) -> String {
        format!("{PUBLIC_VIEW_PAGE}?{}", self.to_query())
    }

    /// Absolute link resolved against the page the app runs on.
    pub fn absolute_link(&self, page: &url::Url) -> Result<url::Url, url::ParseError> {
        page.join(&self.relative_link())
    }
}

#[cfg(test)]
mod tests {
    use super::PublicViewParams;
    use crate::model::{OrgId, UserId};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_parameters() {
        let p = PublicViewParams::from_query("?userId=3&orgId=12", UserId(1));
        assert_eq!(p, PublicViewParams::new(UserId(3), Some(OrgId(12))));
    }

    #[test]
    fn missing_user_uses_fallback() {
        let p = PublicViewParams::from_query("orgId=999", UserId(1));
        assert_eq!(p, PublicViewParams::new(UserId(1), Some(OrgId(999))));

        let p = PublicViewParams::from_query("", UserId(5));
        assert_eq!(p, PublicViewParams::new(UserId(5), None));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let p = PublicViewParams::from_query("?userId=abc&orgId=-1", UserId(1));
        assert_eq!(p, PublicViewParams::new(UserId(1), None));
    }

    #[test]
    fn links_round_trip() {
        let p = PublicViewParams::new(UserId(3), Some(OrgId(12)));
        assert_eq!(p.relative_link(), "public-view.html?userId=3&orgId=12");

        let page = url::Url::parse("https://tour.example.org/app/index.html").expect("url");
        let link = p.absolute_link(&page).expect("link");
        assert_eq!(
            link.as_str(),
            "https://tour.example.org/app/public-view.html?userId=3&orgId=12"
        );
        let back = PublicViewParams::from_query(link.query().unwrap_or_default(), UserId(1));
        assert_eq!(back, p);
    }
}
