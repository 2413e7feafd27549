//! Typed client handle over a [`Transport`].

use std::sync::Arc;
use std::time::Duration;

use cos_transactions::SignedTransaction;
use cos_types::{AccountName, ChainState, TimePointSec, TrxId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::RpcError;
use crate::order::{
    AccountBalanceOrder, AccountCreatedOrder, AccountVestOrder, BpVoteCountOrder,
    ContractCreatedOrder, FollowerCreatedOrder, FollowingCreatedOrder, PostCreatedOrder,
    PostVestOrder, TrxTimeOrder,
};
use crate::pagination::Page;
use crate::responses::{
    AccountInfo, BlockProducerInfo, BlockSummary, BroadcastResponse, ContractInfo, DailyTrxInfo,
    FollowCount, FollowerEntry, FollowingEntry, PostInfo, SignedBlockInfo, StakeInfo,
    TableContent, TrxInfo,
};
use crate::transport::{HttpTransport, Transport};

/// Cloneable handle to one node.
///
/// Clones share the transport. Reconnecting means building a new client;
/// nothing is closed implicitly.
#[derive(Clone)]
pub struct NodeClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient").finish_non_exhaustive()
    }
}

impl NodeClient {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// HTTP client for `node_url` with explicit timeouts.
    pub fn connect(
        node_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, RpcError> {
        Ok(Self::new(HttpTransport::with_timeouts(
            node_url,
            request_timeout,
            connect_timeout,
        )?))
    }

    /// Issue one call and decode its result.
    pub fn call<T: DeserializeOwned>(&self, action: &str, params: Value) -> Result<T, RpcError> {
        debug!(action, "node call");
        let result = self.transport.call(action, params)?;
        serde_json::from_value(result).map_err(|e| {
            warn!(action, error = %e, "undecodable node response");
            RpcError::InvalidResponse(format!("{action}: {e}"))
        })
    }

    fn range<K: Serialize, R: DeserializeOwned>(
        &self,
        action: &str,
        page: &Page<K>,
        extra: Value,
    ) -> Result<Vec<R>, RpcError> {
        let mut params = serde_json::to_value(page)
            .map_err(|e| RpcError::InvalidResponse(format!("unencodable page: {e}")))?;
        if let (Some(params), Value::Object(extra)) = (params.as_object_mut(), extra) {
            params.extend(extra);
        }
        self.call(action, params)
    }

    // ── Chain ────────────────────────────────────────────────────────────

    pub fn get_chain_state(&self) -> Result<ChainState, RpcError> {
        self.call("get_chain_state", json!({}))
    }

    pub fn broadcast_trx(&self, trx: &SignedTransaction) -> Result<BroadcastResponse, RpcError> {
        let transaction = serde_json::to_value(trx)
            .map_err(|e| RpcError::InvalidResponse(format!("unencodable transaction: {e}")))?;
        let response: BroadcastResponse =
            self.call("broadcast_trx", json!({ "transaction": transaction }))?;
        info!(
            status = response.status,
            operations = trx.trx.operations.len(),
            "transaction broadcast"
        );
        Ok(response)
    }

    pub fn get_block_list(
        &self,
        start: u64,
        end: u64,
        limit: u32,
    ) -> Result<Vec<BlockSummary>, RpcError> {
        self.call(
            "get_block_list",
            json!({ "start": start, "end": end, "limit": limit }),
        )
    }

    pub fn get_signed_block(&self, block_num: u64) -> Result<SignedBlockInfo, RpcError> {
        self.call("get_signed_block", json!({ "start": block_num }))
    }

    pub fn get_trx_info_by_id(&self, trx_id: &TrxId) -> Result<TrxInfo, RpcError> {
        self.call("get_trx_info_by_id", json!({ "trx_id": trx_id }))
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    pub fn get_account_by_name(&self, name: &AccountName) -> Result<AccountInfo, RpcError> {
        self.call("get_account_by_name", json!({ "account_name": name }))
    }

    /// Look up the account owning a `COS`-prefixed public key.
    pub fn get_account_by_pub_key(&self, public_key: &str) -> Result<AccountInfo, RpcError> {
        self.call("get_account_by_pub_key", json!({ "public_key": public_key }))
    }

    pub fn get_follow_count_by_name(&self, name: &AccountName) -> Result<FollowCount, RpcError> {
        self.call("get_follow_count_by_name", json!({ "account_name": name }))
    }

    pub fn get_follower_list_by_name(
        &self,
        page: &Page<FollowerCreatedOrder>,
    ) -> Result<Vec<FollowerEntry>, RpcError> {
        self.range("get_follower_list_by_name", page, Value::Null)
    }

    pub fn get_following_list_by_name(
        &self,
        page: &Page<FollowingCreatedOrder>,
    ) -> Result<Vec<FollowingEntry>, RpcError> {
        self.range("get_following_list_by_name", page, Value::Null)
    }

    pub fn get_account_list_by_balance(
        &self,
        page: &Page<AccountBalanceOrder>,
    ) -> Result<Vec<AccountInfo>, RpcError> {
        self.range("get_account_list_by_balance", page, Value::Null)
    }

    pub fn get_account_list_by_vest(
        &self,
        page: &Page<AccountVestOrder>,
    ) -> Result<Vec<AccountInfo>, RpcError> {
        self.range("get_account_list_by_vest", page, Value::Null)
    }

    pub fn get_account_list_by_create_time(
        &self,
        page: &Page<AccountCreatedOrder>,
    ) -> Result<Vec<AccountInfo>, RpcError> {
        self.range("get_account_list_by_create_time", page, Value::Null)
    }

    pub fn get_my_stakes(
        &self,
        name: &AccountName,
        page: &Page<AccountName>,
    ) -> Result<Vec<StakeInfo>, RpcError> {
        self.range("get_my_stakes", page, json!({ "account_name": name }))
    }

    pub fn get_my_stakers(
        &self,
        name: &AccountName,
        page: &Page<AccountName>,
    ) -> Result<Vec<StakeInfo>, RpcError> {
        self.range("get_my_stakers", page, json!({ "account_name": name }))
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub fn get_trx_list_by_time(
        &self,
        page: &Page<TrxTimeOrder>,
    ) -> Result<Vec<TrxInfo>, RpcError> {
        self.range("get_trx_list_by_time", page, Value::Null)
    }

    pub fn get_user_trx_list_by_time(
        &self,
        name: &AccountName,
        page: &Page<TrxTimeOrder>,
    ) -> Result<Vec<TrxInfo>, RpcError> {
        self.range("get_user_trx_list_by_time", page, json!({ "name": name }))
    }

    pub fn get_daily_total_trx_info(
        &self,
        page: &Page<TimePointSec>,
    ) -> Result<Vec<DailyTrxInfo>, RpcError> {
        self.range("get_daily_total_trx_info", page, Value::Null)
    }

    // ── Content ──────────────────────────────────────────────────────────

    pub fn get_post_info_by_id(&self, post_id: u64) -> Result<PostInfo, RpcError> {
        self.call("get_post_info_by_id", json!({ "post_id": post_id }))
    }

    pub fn get_post_list_by_create_time(
        &self,
        page: &Page<PostCreatedOrder>,
    ) -> Result<Vec<PostInfo>, RpcError> {
        self.range("get_post_list_by_create_time", page, Value::Null)
    }

    pub fn get_post_list_by_name(
        &self,
        name: &AccountName,
        page: &Page<PostCreatedOrder>,
    ) -> Result<Vec<PostInfo>, RpcError> {
        self.range("get_post_list_by_name", page, json!({ "name": name }))
    }

    pub fn get_post_list_by_vest(
        &self,
        page: &Page<PostVestOrder>,
    ) -> Result<Vec<PostInfo>, RpcError> {
        self.range("get_post_list_by_vest", page, Value::Null)
    }

    // ── Block producers ──────────────────────────────────────────────────

    pub fn get_block_producer_by_name(
        &self,
        name: &AccountName,
    ) -> Result<BlockProducerInfo, RpcError> {
        self.call("get_block_producer_by_name", json!({ "bp": name }))
    }

    pub fn get_block_producer_list_by_vote_count(
        &self,
        page: &Page<BpVoteCountOrder>,
    ) -> Result<Vec<BlockProducerInfo>, RpcError> {
        self.range("get_block_producer_list_by_vote_count", page, Value::Null)
    }

    // ── Contracts ────────────────────────────────────────────────────────

    pub fn get_contract_info(
        &self,
        owner: &AccountName,
        contract: &str,
    ) -> Result<ContractInfo, RpcError> {
        self.call(
            "get_contract_info",
            json!({ "owner": owner, "contract_name": contract }),
        )
    }

    pub fn get_contract_list_by_time(
        &self,
        page: &Page<ContractCreatedOrder>,
    ) -> Result<Vec<ContractInfo>, RpcError> {
        self.range("get_contract_list_by_time", page, Value::Null)
    }

    /// Read up to `count` rows of a contract table ordered by `field`.
    pub fn query_table_content(
        &self,
        owner: &AccountName,
        contract: &str,
        table: &str,
        field: &str,
        count: u32,
        reverse: bool,
    ) -> Result<TableContent, RpcError> {
        self.call(
            "query_table_content",
            json!({
                "owner": owner,
                "contract": contract,
                "table": table,
                "field": field,
                "count": count,
                "reverse": reverse,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers every call with one canned result and records what it was asked.
    struct StubTransport {
        result: Result<Value, RpcError>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubTransport {
        fn answering(result: Value) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(result),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: RpcError) -> Arc<Self> {
            Arc::new(Self {
                result: Err(err),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn last_call(&self) -> (String, Value) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for StubTransport {
        fn call(&self, action: &str, params: Value) -> Result<Value, RpcError> {
            self.calls
                .lock()
                .unwrap()
                .push((action.to_string(), params));
            self.result.clone()
        }
    }

    fn client(stub: &Arc<StubTransport>) -> NodeClient {
        NodeClient::from_shared(stub.clone())
    }

    #[test]
    fn chain_state_decodes() {
        let stub = StubTransport::answering(json!({
            "head_block_id": "00".repeat(32),
            "head_block_number": 12,
            "head_block_time": 1000,
            "last_irreversible_block_number": 10,
        }));
        let state = client(&stub).get_chain_state().unwrap();
        assert_eq!(state.head_block_number, 12);
        assert_eq!(stub.last_call().0, "get_chain_state");
    }

    #[test]
    fn account_lookup_sends_name() {
        let stub = StubTransport::answering(json!({ "account_name": "alice1", "coin": 5 }));
        let info = client(&stub)
            .get_account_by_name(&AccountName::new("alice1"))
            .unwrap();
        assert_eq!(info.coin.value(), 5);
        let (action, params) = stub.last_call();
        assert_eq!(action, "get_account_by_name");
        assert_eq!(params, json!({ "account_name": "alice1" }));
    }

    #[test]
    fn range_query_encodes_page_and_extras() {
        let stub = StubTransport::answering(json!([]));
        let page = Page {
            start: PostCreatedOrder::default(),
            end: PostCreatedOrder {
                created: TimePointSec::MAX,
                post_id: u64::MAX,
            },
            limit: 10,
            last_order: Some(PostCreatedOrder {
                created: TimePointSec::new(500),
                post_id: 7,
            }),
        };
        let posts = client(&stub)
            .get_post_list_by_name(&AccountName::new("alice1"), &page)
            .unwrap();
        assert!(posts.is_empty());
        let (action, params) = stub.last_call();
        assert_eq!(action, "get_post_list_by_name");
        assert_eq!(params["name"], "alice1");
        assert_eq!(params["limit"], 10);
        assert_eq!(params["start"]["created"], 0);
        assert_eq!(params["last_order"]["created"], 500);
    }

    #[test]
    fn undecodable_result_is_invalid_response() {
        let stub = StubTransport::answering(json!("not a state"));
        assert!(matches!(
            client(&stub).get_chain_state(),
            Err(RpcError::InvalidResponse(_))
        ));
    }

    #[test]
    fn transport_errors_pass_through() {
        let stub = StubTransport::failing(RpcError::Http(503));
        assert_eq!(
            client(&stub).get_follow_count_by_name(&AccountName::new("alice1")),
            Err(RpcError::Http(503))
        );
    }

    #[test]
    fn clones_share_the_transport() {
        let stub = StubTransport::answering(json!({ "follower_count": 1, "following_count": 2 }));
        let a = client(&stub);
        let b = a.clone();
        a.get_follow_count_by_name(&AccountName::new("alice1")).unwrap();
        b.get_follow_count_by_name(&AccountName::new("bobbob")).unwrap();
        assert_eq!(stub.calls.lock().unwrap().len(), 2);
    }
}
