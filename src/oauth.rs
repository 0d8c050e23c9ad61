//! Client-credentials exchange through the `oauth2` crate over any [`HttpTransport`].

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse, BasicTokenType},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthStyle, ClientCredentials, TokenError},
	error::ConfigError,
	http::{HttpRequest, HttpTransport, Response},
};

type CredentialsClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Pre-configured token request for one set of client credentials.
pub(crate) struct ClientCredentialsExchange {
	oauth_client: CredentialsClient,
	handle: ExchangeHandle,
	scopes: Vec<String>,
	extra_params: Vec<(String, String)>,
}
impl ClientCredentialsExchange {
	pub(crate) fn new(
		credentials: &ClientCredentials,
		transport: Arc<dyn HttpTransport>,
	) -> Result<Self, ConfigError> {
		let token_url = TokenUrl::new(credentials.token_url.to_string())
			.map_err(|source| ConfigError::InvalidTokenUrl { source })?;
		let mut oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
			.set_client_secret(ClientSecret::new(credentials.client_secret.expose().to_owned()))
			.set_token_uri(token_url);

		if matches!(credentials.auth_style, AuthStyle::Body) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self {
			oauth_client,
			handle: ExchangeHandle(transport),
			scopes: credentials.scopes.clone(),
			extra_params: credentials.extra_params.clone(),
		})
	}

	pub(crate) async fn exchange(&self) -> Result<AccessToken, TokenError> {
		let mut request = self.oauth_client.exchange_client_credentials();

		for scope in &self.scopes {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}
		for (key, value) in &self.extra_params {
			request = request.add_extra_param(key, value);
		}

		let response = request.request_async(&self.handle).await.map_err(map_request_error)?;

		map_token_response(response)
	}
}
impl Debug for ClientCredentialsExchange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsExchange")
			.field("scopes", &self.scopes)
			.field("extra_params", &self.extra_params.len())
			.finish()
	}
}

/// Adapter that lets `oauth2` drive token requests through an [`HttpTransport`].
#[derive(Clone)]
struct ExchangeHandle(Arc<dyn HttpTransport>);
impl<'c> AsyncHttpClient<'c> for ExchangeHandle {
	type Error = TransportError;
	type Future =
		Pin<Box<dyn Future<Output = Result<oauth2::HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move { self.0.execute(request).await.map(Response::into_http) })
	}
}

fn map_token_response(response: BasicTokenResponse) -> Result<AccessToken, TokenError> {
	let token_type = match response.token_type() {
		BasicTokenType::Bearer => "bearer".to_owned(),
		BasicTokenType::Mac => "mac".to_owned(),
		BasicTokenType::Extension(other) => other.to_owned(),
	};
	let token = AccessToken::new(response.access_token().secret().to_owned(), token_type);

	// A zero lifetime means the endpoint did not bound the token.
	match response.expires_in().filter(|lifetime| !lifetime.is_zero()) {
		Some(lifetime) => token.expires_in(lifetime),
		None => Ok(token),
	}
}

fn map_request_error(err: BasicRequestTokenError<TransportError>) -> TokenError {
	match err {
		RequestTokenError::ServerResponse(response) => TokenError::Rejected {
			error: response.error().to_string(),
			description: response.error_description().cloned(),
		},
		RequestTokenError::Request(error) => TokenError::Transport(Box::new(error)),
		RequestTokenError::Parse(source, _body) => TokenError::MalformedResponse { source },
		RequestTokenError::Other(message) => TokenError::UnexpectedResponse { message },
	}
}
