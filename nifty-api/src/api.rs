use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use nifty_core::{
    collection::{Collection, CollectionInfo},
    data_structures::CollectionEvent,
    types::*,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// HTTP front end over a single collection
pub struct NiftyApi {
    pub collection: Arc<RwLock<Collection>>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    fn from_result(result: NiftyResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => {
                warn!(error = %e, "request failed");
                Self::error(e.to_string())
            }
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, StatusCode>;

/// Request bodies
#[derive(Debug, Deserialize)]
pub struct MintRequest {
    pub to: String,

    /// Whitelisted minter to act as; the deployer when absent
    #[serde(default)]
    pub caller: Option<String>,

    /// Token URI overriding the collection base URI
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub to: String,
    pub token_id: TokenId,
}

#[derive(Debug, Deserialize)]
pub struct TransferFromRequest {
    pub caller: String,
    pub from: String,
    pub to: String,
    pub token_id: TokenId,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub caller: String,
    pub to: String,
    pub token_id: TokenId,
}

#[derive(Debug, Deserialize)]
pub struct AddMintersRequest {
    pub caller: String,
    pub accounts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveMinterRequest {
    pub caller: String,
    pub account: String,
}

#[derive(Debug, Deserialize)]
pub struct OperatorRequest {
    pub caller: String,
    pub operator: String,
    pub approved: bool,
}

/// Responses
#[derive(Debug, Serialize, Deserialize)]
pub struct MintResponse {
    pub token_id: TokenId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub owner: Address,
    pub balance: Balance,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub token_id: TokenId,
    pub owner: Address,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokensResponse {
    pub owner: Address,
    pub tokens: Vec<TokenId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenUriResponse {
    pub token_id: TokenId,
    pub uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<CollectionEvent>,
    pub digest: String,
}

impl NiftyApi {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection: Arc::new(RwLock::new(collection)),
        }
    }

    /// Create the Axum router with all endpoints
    pub fn router(self) -> Router {
        let shared_state = Arc::new(self);

        Router::new()
            // State-changing endpoints
            .route("/mint", post(mint))
            .route("/burn/:token_id", post(burn))
            .route("/transfer", post(transfer))
            .route("/transfer_from", post(transfer_from))
            .route("/approve", post(approve))
            .route("/operators", post(set_operator))
            .route("/minters", post(add_minters).get(list_minters))
            .route("/minters/remove", post(remove_minter))

            // Queries
            .route("/balance/:owner", get(balance_of))
            .route("/owner/:token_id", get(owner_of))
            .route("/tokens/:owner", get(tokens_by_owner))
            .route("/token_uri/:token_id", get(token_uri))
            .route("/events", get(events))

            // Health and info
            .route("/health", get(health_check))
            .route("/info", get(get_info))

            .with_state(shared_state)
    }

    /// Start the API server
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let listener = TcpListener::bind(addr).await?;

        info!(%addr, "nifty API server listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn parse_address(s: &str) -> NiftyResult<Address> {
    s.parse()
}

// Handler functions
pub async fn mint(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<MintRequest>,
) -> ApiResult<MintResponse> {
    Ok(Json(ApiResponse::from_result(handle_mint(api, req).await)))
}

async fn handle_mint(api: Arc<NiftyApi>, req: MintRequest) -> NiftyResult<MintResponse> {
    let to = parse_address(&req.to)?;
    let caller = req.caller.as_deref().map(parse_address).transpose()?;

    let mut collection = api.collection.write().await;
    let token_id = match (caller, req.uri) {
        (None, None) => collection.mint(to)?,
        (caller, uri) => {
            let caller = caller.unwrap_or_else(|| collection.deployer());
            collection.mint_as(caller, to, uri)?
        }
    };
    info!(%to, token_id, "mint");
    Ok(MintResponse { token_id })
}

pub async fn burn(
    State(api): State<Arc<NiftyApi>>,
    Path(token_id): Path<TokenId>,
) -> ApiResult<TokenId> {
    let result = api.collection.write().await.burn(token_id).map(|_| token_id);
    Ok(Json(ApiResponse::from_result(result)))
}

pub async fn transfer(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<OwnerResponse> {
    Ok(Json(ApiResponse::from_result(handle_transfer(api, req).await)))
}

async fn handle_transfer(api: Arc<NiftyApi>, req: TransferRequest) -> NiftyResult<OwnerResponse> {
    let to = parse_address(&req.to)?;
    api.collection.write().await.transfer(to, req.token_id)?;
    Ok(OwnerResponse { token_id: req.token_id, owner: to })
}

pub async fn transfer_from(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<TransferFromRequest>,
) -> ApiResult<OwnerResponse> {
    Ok(Json(ApiResponse::from_result(handle_transfer_from(api, req).await)))
}

async fn handle_transfer_from(
    api: Arc<NiftyApi>,
    req: TransferFromRequest,
) -> NiftyResult<OwnerResponse> {
    let caller = parse_address(&req.caller)?;
    let from = parse_address(&req.from)?;
    let to = parse_address(&req.to)?;
    api.collection
        .write()
        .await
        .transfer_from(caller, from, to, req.token_id)?;
    Ok(OwnerResponse { token_id: req.token_id, owner: to })
}

pub async fn approve(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<ApproveRequest>,
) -> ApiResult<TokenId> {
    Ok(Json(ApiResponse::from_result(handle_approve(api, req).await)))
}

async fn handle_approve(api: Arc<NiftyApi>, req: ApproveRequest) -> NiftyResult<TokenId> {
    let caller = parse_address(&req.caller)?;
    let to = parse_address(&req.to)?;
    api.collection.write().await.approve(caller, to, req.token_id)?;
    Ok(req.token_id)
}

pub async fn set_operator(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<OperatorRequest>,
) -> ApiResult<bool> {
    Ok(Json(ApiResponse::from_result(handle_set_operator(api, req).await)))
}

async fn handle_set_operator(api: Arc<NiftyApi>, req: OperatorRequest) -> NiftyResult<bool> {
    let caller = parse_address(&req.caller)?;
    let operator = parse_address(&req.operator)?;
    api.collection
        .write()
        .await
        .set_approval_for_all(caller, operator, req.approved)?;
    Ok(req.approved)
}

pub async fn add_minters(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<AddMintersRequest>,
) -> ApiResult<Vec<Address>> {
    Ok(Json(ApiResponse::from_result(handle_add_minters(api, req).await)))
}

async fn handle_add_minters(
    api: Arc<NiftyApi>,
    req: AddMintersRequest,
) -> NiftyResult<Vec<Address>> {
    let caller = parse_address(&req.caller)?;
    let accounts = req
        .accounts
        .iter()
        .map(|s| parse_address(s))
        .collect::<NiftyResult<Vec<_>>>()?;
    let mut collection = api.collection.write().await;
    collection.add_minters(caller, &accounts)?;
    Ok(collection.minters())
}

pub async fn remove_minter(
    State(api): State<Arc<NiftyApi>>,
    Json(req): Json<RemoveMinterRequest>,
) -> ApiResult<bool> {
    Ok(Json(ApiResponse::from_result(handle_remove_minter(api, req).await)))
}

async fn handle_remove_minter(api: Arc<NiftyApi>, req: RemoveMinterRequest) -> NiftyResult<bool> {
    let caller = parse_address(&req.caller)?;
    let account = parse_address(&req.account)?;
    api.collection.write().await.remove_minter(caller, account)
}

pub async fn list_minters(State(api): State<Arc<NiftyApi>>) -> ApiResult<Vec<Address>> {
    let minters = api.collection.read().await.minters();
    Ok(Json(ApiResponse::success(minters)))
}

pub async fn balance_of(
    State(api): State<Arc<NiftyApi>>,
    Path(owner): Path<String>,
) -> ApiResult<BalanceResponse> {
    let result = match parse_address(&owner) {
        Ok(owner) => api
            .collection
            .read()
            .await
            .balance_of(owner)
            .map(|balance| BalanceResponse { owner, balance }),
        Err(e) => Err(e),
    };
    Ok(Json(ApiResponse::from_result(result)))
}

pub async fn owner_of(
    State(api): State<Arc<NiftyApi>>,
    Path(token_id): Path<TokenId>,
) -> ApiResult<OwnerResponse> {
    let result = api
        .collection
        .read()
        .await
        .owner_of(token_id)
        .map(|owner| OwnerResponse { token_id, owner });
    Ok(Json(ApiResponse::from_result(result)))
}

pub async fn tokens_by_owner(
    State(api): State<Arc<NiftyApi>>,
    Path(owner): Path<String>,
) -> ApiResult<TokensResponse> {
    let result = match parse_address(&owner) {
        Ok(owner) => api
            .collection
            .read()
            .await
            .tokens_by_owner(owner)
            .map(|tokens| TokensResponse { owner, tokens }),
        Err(e) => Err(e),
    };
    Ok(Json(ApiResponse::from_result(result)))
}

pub async fn token_uri(
    State(api): State<Arc<NiftyApi>>,
    Path(token_id): Path<TokenId>,
) -> ApiResult<TokenUriResponse> {
    let result = api
        .collection
        .read()
        .await
        .token_uri(token_id)
        .map(|uri| TokenUriResponse { token_id, uri });
    Ok(Json(ApiResponse::from_result(result)))
}

pub async fn events(State(api): State<Arc<NiftyApi>>) -> ApiResult<EventsResponse> {
    let collection = api.collection.read().await;
    let response = EventsResponse {
        events: collection.events().to_vec(),
        digest: format!("0x{}", hex::encode(collection.log_digest())),
    };
    Ok(Json(ApiResponse::success(response)))
}

pub async fn health_check() -> ApiResult<String> {
    Ok(Json(ApiResponse::success("OK".to_string())))
}

pub async fn get_info(State(api): State<Arc<NiftyApi>>) -> ApiResult<CollectionInfo> {
    let info = api.collection.read().await.info();
    Ok(Json(ApiResponse::success(info)))
}
