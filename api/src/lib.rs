use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;
use types::{
    Result, UserType,
    entity::Resource,
    form::{Draft, Submission},
    listing::{Envelope, ListPayload, ListQuery, Page},
    session::SignInResponse,
};

trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<Envelope<T>>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<Envelope<T>> {
        let response = self.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(types::Error::Unauthorized);
        }
        let body = response.bytes().await?;

        match serde_json::from_slice(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(types::Error::Http(format!("HTTP {status}"))),
            Err(error) => {
                tracing::debug!(%error, %status, "failed to parse response");
                Err(error.into())
            }
        }
    }
}

/// Client for the storefront REST API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl ApiClient {
    /// `base_url` should end with `/`; endpoint paths are joined beneath it.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `{base}/{scope}/{endpoint}/{id}` with the id percent-encoded as a
    /// single segment.
    fn record_url<R: Resource>(&self, scope: UserType, id: &str) -> Result<Url> {
        let mut url = self.url(&collection_path::<R>(scope))?;
        url.path_segments_mut()
            .map_err(|_| types::Error::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.request_url(method, self.url(path)?))
    }

    fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);

        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    pub async fn sign_in(
        &self,
        user_type: UserType,
        email: &str,
        password: &str,
    ) -> Result<SignInResponse> {
        self.request(Method::POST, &sign_in_path(user_type))?
            .json(&json!({ "email": email, "password": password }))
            .try_send()
            .await?
            .into_result()
    }

    /// Ask the API whether the current token is still good.
    pub async fn verify_session(&self) -> Result<()> {
        self.request(Method::GET, "auth/verify")?
            .try_send::<IgnoredAny>()
            .await?
            .into_ack()
    }

    pub async fn list<R: Resource>(&self, scope: UserType, query: &ListQuery) -> Result<Page<R>> {
        self.request(Method::GET, &collection_path::<R>(scope))?
            .query(&query.query_pairs())
            .try_send::<ListPayload<R>>()
            .await?
            .into_result()
            .map(Page::from)
    }

    pub async fn create<R: Resource>(&self, scope: UserType, draft: &Draft) -> Result<()> {
        self.request(Method::POST, &collection_path::<R>(scope))?
            .json(&draft.to_json(R::FIELDS, Submission::Create))
            .try_send::<IgnoredAny>()
            .await?
            .into_ack()
    }

    pub async fn update<R: Resource>(&self, scope: UserType, id: &str, draft: &Draft) -> Result<()> {
        self.request_url(Method::PUT, self.record_url::<R>(scope, id)?)
            .json(&draft.to_json(R::FIELDS, Submission::Update))
            .try_send::<IgnoredAny>()
            .await?
            .into_ack()
    }

    pub async fn delete<R: Resource>(&self, scope: UserType, id: &str) -> Result<()> {
        self.request_url(Method::DELETE, self.record_url::<R>(scope, id)?)
            .try_send::<IgnoredAny>()
            .await?
            .into_ack()
    }
}

fn sign_in_path(user_type: UserType) -> String {
    format!("auth/{user_type}/sign-in")
}

fn collection_path<R: Resource>(scope: UserType) -> String {
    format!("{scope}/{}", R::ENDPOINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::entity::{Brand, Order};

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("https://shop.example/api/").unwrap())
    }

    #[test]
    fn paths_are_scoped_by_role() {
        let client = client();
        assert_eq!(
            client.url(&collection_path::<Brand>(UserType::Admin)).unwrap().as_str(),
            "https://shop.example/api/admin/brands"
        );
        assert_eq!(
            client.url(&collection_path::<Order>(UserType::User)).unwrap().as_str(),
            "https://shop.example/api/user/orders"
        );
        assert_eq!(
            client.url(&sign_in_path(UserType::Admin)).unwrap().as_str(),
            "https://shop.example/api/auth/admin/sign-in"
        );
    }

    #[test]
    fn record_ids_are_one_escaped_segment() {
        let client = client();
        assert_eq!(
            client.record_url::<Brand>(UserType::Admin, "a/b c").unwrap().as_str(),
            "https://shop.example/api/admin/brands/a%2Fb%20c"
        );
        assert_eq!(
            client.record_url::<Order>(UserType::User, "65f1").unwrap().as_str(),
            "https://shop.example/api/user/orders/65f1"
        );
    }

    #[test]
    fn token_is_optional() {
        let client = client().with_token(Some("t".to_string().into()));
        assert!(client.token.is_some());
        assert!(client.with_token(None).token.is_none());
    }
}
