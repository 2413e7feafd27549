//! Read-only chain queries shared by both wallet kinds.
//!
//! Range queries come back as [`PageManager`]s. Bounds are always ascending:
//! `start` is the lowest key of the range and `end` the highest. Account
//! scoped lists (followers, posts by author, stakes) fix the account part of
//! the key and span everything else.

use cos_rpc::order::{
    AccountBalanceOrder, AccountCreatedOrder, AccountVestOrder, BpVoteCountOrder,
    ContractCreatedOrder, FollowerCreatedOrder, FollowingCreatedOrder, PostCreatedOrder,
    PostVestOrder, TrxTimeOrder,
};
use cos_rpc::pagination::{with_last_key, DEFAULT_PAGE_SIZE};
use cos_rpc::responses::{
    AccountInfo, BlockProducerInfo, BlockSummary, ContractInfo, DailyTrxInfo, FollowCount,
    FollowerEntry, FollowingEntry, PostInfo, SignedBlockInfo, StakeInfo, TableContent, TrxInfo,
};
use cos_rpc::{NodeClient, PageManager};
use cos_types::{AccountName, ChainState, Coin, TimePointSec, TrxId, Vest};

use crate::error::WalletError;

/// Highest valid account name, the upper bound of name-ordered ranges.
fn max_account_name() -> AccountName {
    AccountName::new("z".repeat(AccountName::MAX_LEN))
}

#[derive(Clone)]
pub struct Queries {
    client: NodeClient,
    page_size: u32,
}

impl Queries {
    pub fn new(client: NodeClient) -> Self {
        Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Entries requested per page by the paginated queries.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn client(&self) -> &NodeClient {
        &self.client
    }

    pub fn set_client(&mut self, client: NodeClient) {
        self.client = client;
    }

    // ── Direct queries ───────────────────────────────────────────────────

    pub fn chain_state(&self) -> Result<ChainState, WalletError> {
        Ok(self.client.get_chain_state()?)
    }

    pub fn account(&self, name: &AccountName) -> Result<AccountInfo, WalletError> {
        Ok(self.client.get_account_by_name(name)?)
    }

    pub fn account_by_public_key(&self, public_key: &str) -> Result<AccountInfo, WalletError> {
        Ok(self.client.get_account_by_pub_key(public_key)?)
    }

    pub fn follow_count(&self, name: &AccountName) -> Result<FollowCount, WalletError> {
        Ok(self.client.get_follow_count_by_name(name)?)
    }

    pub fn block_producer(&self, name: &AccountName) -> Result<BlockProducerInfo, WalletError> {
        Ok(self.client.get_block_producer_by_name(name)?)
    }

    pub fn post(&self, post_id: u64) -> Result<PostInfo, WalletError> {
        Ok(self.client.get_post_info_by_id(post_id)?)
    }

    pub fn transaction(&self, trx_id: &TrxId) -> Result<TrxInfo, WalletError> {
        Ok(self.client.get_trx_info_by_id(trx_id)?)
    }

    pub fn block_list(
        &self,
        start: u64,
        end: u64,
        limit: u32,
    ) -> Result<Vec<BlockSummary>, WalletError> {
        Ok(self.client.get_block_list(start, end, limit)?)
    }

    pub fn signed_block(&self, block_num: u64) -> Result<SignedBlockInfo, WalletError> {
        Ok(self.client.get_signed_block(block_num)?)
    }

    pub fn contract(
        &self,
        owner: &AccountName,
        contract: &str,
    ) -> Result<ContractInfo, WalletError> {
        Ok(self.client.get_contract_info(owner, contract)?)
    }

    pub fn table_content(
        &self,
        owner: &AccountName,
        contract: &str,
        table: &str,
        field: &str,
        count: u32,
        reverse: bool,
    ) -> Result<TableContent, WalletError> {
        Ok(self
            .client
            .query_table_content(owner, contract, table, field, count, reverse)?)
    }

    // ── Paginated queries ────────────────────────────────────────────────

    pub fn followers(
        &self,
        name: &AccountName,
    ) -> PageManager<FollowerCreatedOrder, FollowerEntry> {
        let start = FollowerCreatedOrder {
            account: name.clone(),
            created_time: TimePointSec::MIN,
            follower: AccountName::empty(),
        };
        let end = FollowerCreatedOrder {
            account: name.clone(),
            created_time: TimePointSec::MAX,
            follower: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(start, end, self.page_size, move |page| {
            let items = client.get_follower_list_by_name(page)?;
            Ok(with_last_key(items, |e| e.create_order.clone()))
        })
    }

    pub fn following(
        &self,
        name: &AccountName,
    ) -> PageManager<FollowingCreatedOrder, FollowingEntry> {
        let start = FollowingCreatedOrder {
            account: name.clone(),
            created_time: TimePointSec::MIN,
            following: AccountName::empty(),
        };
        let end = FollowingCreatedOrder {
            account: name.clone(),
            created_time: TimePointSec::MAX,
            following: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(start, end, self.page_size, move |page| {
            let items = client.get_following_list_by_name(page)?;
            Ok(with_last_key(items, |e| e.create_order.clone()))
        })
    }

    pub fn accounts_by_balance(&self) -> PageManager<AccountBalanceOrder, AccountInfo> {
        let end = AccountBalanceOrder {
            balance: Coin::MAX,
            name: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(AccountBalanceOrder::default(), end, self.page_size, move |page| {
            let items = client.get_account_list_by_balance(page)?;
            Ok(with_last_key(items, |a| AccountBalanceOrder {
                balance: a.coin,
                name: a.account_name.clone(),
            }))
        })
    }

    pub fn accounts_by_vest(&self) -> PageManager<AccountVestOrder, AccountInfo> {
        let end = AccountVestOrder {
            vest: Vest::MAX,
            name: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(AccountVestOrder::default(), end, self.page_size, move |page| {
            let items = client.get_account_list_by_vest(page)?;
            Ok(with_last_key(items, |a| AccountVestOrder {
                vest: a.vest,
                name: a.account_name.clone(),
            }))
        })
    }

    pub fn accounts_by_create_time(&self) -> PageManager<AccountCreatedOrder, AccountInfo> {
        let end = AccountCreatedOrder {
            created_time: TimePointSec::MAX,
            name: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(AccountCreatedOrder::default(), end, self.page_size, move |page| {
            let items = client.get_account_list_by_create_time(page)?;
            Ok(with_last_key(items, |a| AccountCreatedOrder {
                created_time: a.created_time,
                name: a.account_name.clone(),
            }))
        })
    }

    /// Stakes `name` made, keyed by the receiving account.
    pub fn my_stakes(&self, name: &AccountName) -> PageManager<AccountName, StakeInfo> {
        let client = self.client.clone();
        let owner = name.clone();
        PageManager::new(AccountName::empty(), max_account_name(), self.page_size, move |page| {
            let items = client.get_my_stakes(&owner, page)?;
            Ok(with_last_key(items, |s| s.debtor.clone()))
        })
    }

    /// Stakes others made to `name`, keyed by the staking account.
    pub fn my_stakers(&self, name: &AccountName) -> PageManager<AccountName, StakeInfo> {
        let client = self.client.clone();
        let owner = name.clone();
        PageManager::new(AccountName::empty(), max_account_name(), self.page_size, move |page| {
            let items = client.get_my_stakers(&owner, page)?;
            Ok(with_last_key(items, |s| s.creditor.clone()))
        })
    }

    /// Transactions with block time in `[from, to]`.
    pub fn transactions_by_time(
        &self,
        from: TimePointSec,
        to: TimePointSec,
    ) -> PageManager<TrxTimeOrder, TrxInfo> {
        let (start, end) = trx_time_bounds(from, to);
        let client = self.client.clone();
        PageManager::new(start, end, self.page_size, move |page| {
            let items = client.get_trx_list_by_time(page)?;
            Ok(with_last_key(items, trx_time_key))
        })
    }

    /// Transactions touching `name` with block time in `[from, to]`.
    pub fn user_transactions_by_time(
        &self,
        name: &AccountName,
        from: TimePointSec,
        to: TimePointSec,
    ) -> PageManager<TrxTimeOrder, TrxInfo> {
        let (start, end) = trx_time_bounds(from, to);
        let client = self.client.clone();
        let owner = name.clone();
        PageManager::new(start, end, self.page_size, move |page| {
            let items = client.get_user_trx_list_by_time(&owner, page)?;
            Ok(with_last_key(items, trx_time_key))
        })
    }

    /// Daily transaction totals for the days in `[from, to]`.
    pub fn daily_trx_totals(
        &self,
        from: TimePointSec,
        to: TimePointSec,
    ) -> PageManager<TimePointSec, DailyTrxInfo> {
        let client = self.client.clone();
        PageManager::new(from, to, self.page_size, move |page| {
            let items = client.get_daily_total_trx_info(page)?;
            Ok(with_last_key(items, |d| d.date))
        })
    }

    pub fn posts_by_create_time(&self) -> PageManager<PostCreatedOrder, PostInfo> {
        let client = self.client.clone();
        PageManager::new(
            PostCreatedOrder::default(),
            max_post_created(),
            self.page_size,
            move |page| {
                let items = client.get_post_list_by_create_time(page)?;
                Ok(with_last_key(items, post_created_key))
            },
        )
    }

    /// Posts authored by `name`, oldest first.
    pub fn posts_by_author(&self, name: &AccountName) -> PageManager<PostCreatedOrder, PostInfo> {
        let client = self.client.clone();
        let author = name.clone();
        PageManager::new(
            PostCreatedOrder::default(),
            max_post_created(),
            self.page_size,
            move |page| {
                let items = client.get_post_list_by_name(&author, page)?;
                Ok(with_last_key(items, post_created_key))
            },
        )
    }

    pub fn posts_by_vest(&self) -> PageManager<PostVestOrder, PostInfo> {
        let end = PostVestOrder {
            rewards: Vest::MAX,
            post_id: u64::MAX,
        };
        let client = self.client.clone();
        PageManager::new(PostVestOrder::default(), end, self.page_size, move |page| {
            let items = client.get_post_list_by_vest(page)?;
            Ok(with_last_key(items, |p| PostVestOrder {
                rewards: p.rewards,
                post_id: p.post_id,
            }))
        })
    }

    pub fn block_producers_by_vote_count(
        &self,
    ) -> PageManager<BpVoteCountOrder, BlockProducerInfo> {
        let end = BpVoteCountOrder {
            vote_count: u64::MAX,
            owner: max_account_name(),
        };
        let client = self.client.clone();
        PageManager::new(BpVoteCountOrder::default(), end, self.page_size, move |page| {
            let items = client.get_block_producer_list_by_vote_count(page)?;
            Ok(with_last_key(items, |bp| BpVoteCountOrder {
                vote_count: bp.vote_count,
                owner: bp.owner.clone(),
            }))
        })
    }

    pub fn contracts_by_time(&self) -> PageManager<ContractCreatedOrder, ContractInfo> {
        let end = ContractCreatedOrder {
            created_time: TimePointSec::MAX,
            owner: max_account_name(),
            contract: "\u{10FFFF}".to_string(),
        };
        let client = self.client.clone();
        PageManager::new(ContractCreatedOrder::default(), end, self.page_size, move |page| {
            let items = client.get_contract_list_by_time(page)?;
            Ok(with_last_key(items, |c| ContractCreatedOrder {
                created_time: c.created_time,
                owner: c.owner.clone(),
                contract: c.contract.clone(),
            }))
        })
    }
}

fn trx_time_bounds(from: TimePointSec, to: TimePointSec) -> (TrxTimeOrder, TrxTimeOrder) {
    let start = TrxTimeOrder {
        block_time: from,
        trx_id: TrxId::ZERO,
    };
    let end = TrxTimeOrder {
        block_time: to,
        trx_id: TrxId::new([0xff; 32]),
    };
    (start, end)
}

fn trx_time_key(trx: &TrxInfo) -> TrxTimeOrder {
    TrxTimeOrder {
        block_time: trx.block_time,
        trx_id: trx.trx_id,
    }
}

fn max_post_created() -> PostCreatedOrder {
    PostCreatedOrder {
        created: TimePointSec::MAX,
        post_id: u64::MAX,
    }
}

fn post_created_key(post: &PostInfo) -> PostCreatedOrder {
    PostCreatedOrder {
        created: post.created,
        post_id: post.post_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cos_nullables::NullTransport;
    use cos_rpc::{PageError, RpcError};
    use serde_json::{json, Value};

    fn queries(transport: &NullTransport) -> Queries {
        Queries::new(NodeClient::new(transport.clone())).with_page_size(2)
    }

    fn post(id: u64, created: u32) -> Value {
        json!({ "post_id": id, "author": "alice1", "created": created })
    }

    #[test]
    fn default_page_size() {
        let transport = NullTransport::new();
        let q = Queries::new(NodeClient::new(transport));
        assert_eq!(q.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn direct_query_passes_through() {
        let transport = NullTransport::new();
        transport.respond(
            "get_account_by_name",
            json!({ "account_name": "alice1", "coin": 42 }),
        );
        let info = queries(&transport).account(&"alice1".into()).unwrap();
        assert_eq!(info.coin, Coin::new(42));
        assert_eq!(
            transport.calls_to("get_account_by_name")[0]["account_name"],
            "alice1"
        );
    }

    #[test]
    fn direct_query_error_is_node_error() {
        let transport = NullTransport::new();
        transport.fail("get_post_info_by_id", RpcError::Node("no such post".into()));
        let err = queries(&transport).post(7).unwrap_err();
        assert!(matches!(err, WalletError::Node(RpcError::Node(_))));
    }

    #[test]
    fn posts_resume_after_last_key() {
        let transport = NullTransport::new();
        transport
            .respond("get_post_list_by_create_time", json!([post(1, 100), post(2, 200)]))
            .respond("get_post_list_by_create_time", json!([post(3, 300)]));

        let mut pages = queries(&transport).posts_by_create_time();
        let first = pages.next().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(pages.page_count(), 2);

        let second = pages.next().unwrap();
        assert_eq!(second[0].post_id, 3);

        let calls = transport.calls_to("get_post_list_by_create_time");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0]["limit"], 2);
        assert!(calls[0]["last_order"].is_null());
        assert_eq!(calls[1]["start"], json!({ "created": 200, "post_id": 2 }));
        assert_eq!(calls[1]["last_order"], json!({ "created": 200, "post_id": 2 }));
    }

    #[test]
    fn followers_bounds_are_scoped_and_ascending() {
        let transport = NullTransport::new();
        transport.respond("get_follower_list_by_name", json!([]));

        let mut pages = queries(&transport).followers(&"alice1".into());
        assert!(matches!(pages.next(), Err(PageError::RangeExhausted)));

        let call = transport.calls_to("get_follower_list_by_name").remove(0);
        assert_eq!(call["start"]["account"], "alice1");
        assert_eq!(call["end"]["account"], "alice1");
        assert_eq!(call["start"]["created_time"], 0);
        assert_eq!(call["end"]["created_time"], u32::MAX);
        assert_eq!(call["end"]["follower"], "zzzzzzzzzzzzzzzz");
    }

    #[test]
    fn stakes_carry_account_and_key_by_debtor() {
        let transport = NullTransport::new();
        transport.respond(
            "get_my_stakes",
            json!([{ "creditor": "alice1", "debtor": "bobbob", "amount": 5 }]),
        );

        let mut pages = queries(&transport).my_stakes(&"alice1".into());
        pages.next().unwrap();
        assert_eq!(pages.page(1).unwrap().start, AccountName::new("bobbob"));
        assert_eq!(transport.calls_to("get_my_stakes")[0]["account_name"], "alice1");
    }

    #[test]
    fn fetch_error_leaves_session_unchanged() {
        let transport = NullTransport::new();
        transport.fail("get_trx_list_by_time", RpcError::Http(502));

        let mut pages = queries(&transport)
            .transactions_by_time(TimePointSec::new(10), TimePointSec::new(20));
        assert!(matches!(
            pages.next(),
            Err(PageError::Fetch(RpcError::Http(502)))
        ));
        assert_eq!(pages.page_count(), 1);
        assert_eq!(pages.current_page(), None);
    }

    #[test]
    fn page_size_is_clamped() {
        let transport = NullTransport::new();
        transport.respond("get_block_producer_list_by_vote_count", json!([]));
        let q = Queries::new(NodeClient::new(transport.clone())).with_page_size(50_000);
        let mut pages = q.block_producers_by_vote_count();
        let _ = pages.next();
        let call = transport.calls_to("get_block_producer_list_by_vote_count").remove(0);
        assert_eq!(call["limit"], 1000);
    }
}
