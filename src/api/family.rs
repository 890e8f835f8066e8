//! `IFamilyGroupsService` operations
//!
//! Every endpoint here needs an access token; the API key is never sent.
//! Only the two lookups callers use routinely are typed, the rest hand back
//! the `response` object as JSON.

use log::debug;
use serde_json::Value;

use super::decode;
use crate::auth::{AuthPolicy, TokenFamily};
use crate::client::{ApiRequest, Endpoint, RequestDispatch};
use crate::error::Result;
use crate::models::{FamilyGroupStatus, PlaytimeSummary, SteamId};

const INTERFACE: &str = "IFamilyGroupsService";

fn endpoint(method: &str) -> Endpoint {
    Endpoint::web_api(INTERFACE, method, 1).auth(AuthPolicy::token_only(TokenFamily::WebApi))
}

fn read(method: &str) -> ApiRequest {
    ApiRequest::new(endpoint(method))
}

fn write(method: &str) -> ApiRequest {
    ApiRequest::new(endpoint(method).post())
}

/// Filters for [`FamilyApi::get_shared_library_apps`]
#[derive(Debug, Clone, Default)]
pub struct SharedLibraryOptions {
    pub include_own: bool,
    pub include_excluded: bool,
    pub include_free: bool,
    pub include_non_games: bool,
    pub language: Option<String>,
    pub max_apps: Option<u32>,
    pub steam_id: Option<SteamId>,
}

/// Steam Families operations
#[derive(Clone, Copy)]
pub struct FamilyApi<'a> {
    client: &'a dyn RequestDispatch,
}

impl<'a> FamilyApi<'a> {
    pub fn new(client: &'a dyn RequestDispatch) -> Self {
        Self { client }
    }

    async fn call(&self, request: ApiRequest) -> Result<Value> {
        let name = request.endpoint.name();
        let mut body = self.client.dispatch(request).await?;
        match body.get_mut("response").map(Value::take) {
            Some(response) => Ok(response),
            None => {
                debug!("{} returned no response wrapper", name);
                Ok(body)
            }
        }
    }

    /// Family group of the token's owner, or of `steam_id` for support accounts.
    pub async fn get_family_group_for_user(
        &self,
        steam_id: Option<SteamId>,
    ) -> Result<FamilyGroupStatus> {
        let request = read("GetFamilyGroupForUser").opt_param("steamid", steam_id);
        let response = self.call(request).await?;
        decode(response, "GetFamilyGroupForUser")
    }

    /// Per-member, per-app playtime within a family group.
    pub async fn get_playtime_summary(&self, family_group_id: u64) -> Result<PlaytimeSummary> {
        let request = write("GetPlaytimeSummary").param("family_groupid", family_group_id);
        let response = self.call(request).await?;
        decode(response, "GetPlaytimeSummary")
    }

    pub async fn get_family_group(
        &self,
        family_group_id: u64,
        send_running_apps: bool,
    ) -> Result<Value> {
        let mut request = read("GetFamilyGroup").param("family_group_id", family_group_id);
        if send_running_apps {
            request = request.flag("send_running_apps", true);
        }
        self.call(request).await
    }

    pub async fn get_change_log(&self, family_group_id: u64) -> Result<Value> {
        self.call(read("GetChangeLog").param("family_group_id", family_group_id))
            .await
    }

    pub async fn get_invite_check_results(
        &self,
        family_group_id: u64,
        steam_id: SteamId,
    ) -> Result<Value> {
        self.call(
            read("GetInviteCheckResults")
                .param("family_group_id", family_group_id)
                .param("steamid", steam_id),
        )
        .await
    }

    pub async fn get_preferred_lenders(&self, family_group_id: u64) -> Result<Value> {
        self.call(read("GetPreferredLenders").param("family_group_id", family_group_id))
            .await
    }

    pub async fn get_purchase_requests(
        &self,
        family_group_id: u64,
        request_ids: &[u64],
        include_completed: bool,
        completed_since: Option<i64>,
    ) -> Result<Value> {
        let mut request = read("GetPurchaseRequests")
            .param("family_group_id", family_group_id)
            .flag("include_completed", include_completed)
            .opt_param("rt_include_completed_since", completed_since);
        for (i, id) in request_ids.iter().enumerate() {
            request = request.param(&format!("request_ids[{}]", i), id);
        }
        self.call(request).await
    }

    pub async fn get_shared_library_apps(
        &self,
        family_group_id: u64,
        options: &SharedLibraryOptions,
    ) -> Result<Value> {
        let request = read("GetSharedLibraryApps")
            .param("family_group_id", family_group_id)
            .flag("include_own", options.include_own)
            .flag("include_excluded", options.include_excluded)
            .flag("include_free", options.include_free)
            .flag("include_non_games", options.include_non_games)
            .opt_param("language", options.language.as_deref())
            .opt_param("max_apps", options.max_apps)
            .opt_param("steamid", options.steam_id);
        self.call(request).await
    }

    pub async fn get_users_sharing_device(
        &self,
        family_group_id: u64,
        client_session_id: Option<u64>,
        client_instance_id: Option<u64>,
    ) -> Result<Value> {
        let request = read("GetUsersSharingDevice")
            .param("family_group_id", family_group_id)
            .opt_param("client_session_id", client_session_id)
            .opt_param("client_instance_id", client_instance_id);
        self.call(request).await
    }

    pub async fn cancel_invite(&self, family_group_id: u64, steam_id: SteamId) -> Result<Value> {
        self.call(
            write("CancelFamilyGroupInvite")
                .param("family_group_id", family_group_id)
                .param("steamid_to_cancel", steam_id),
        )
        .await
    }

    pub async fn clear_cooldown_skip(&self, steam_id: SteamId, invite_id: u64) -> Result<Value> {
        self.call(
            write("ClearCooldownSkip")
                .param("steamid", steam_id)
                .param("invite_id", invite_id),
        )
        .await
    }

    pub async fn confirm_invite(
        &self,
        family_group_id: u64,
        invite_id: u64,
        nonce: u64,
    ) -> Result<Value> {
        self.call(
            write("ConfirmInviteToFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("invite_id", invite_id)
                .param("nonce", nonce),
        )
        .await
    }

    pub async fn confirm_join(
        &self,
        family_group_id: u64,
        invite_id: u64,
        nonce: u64,
    ) -> Result<Value> {
        self.call(
            write("ConfirmJoinFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("invite_id", invite_id)
                .param("nonce", nonce),
        )
        .await
    }

    /// Create a family group. `steam_id` is only honoured for support accounts.
    pub async fn create_family_group(&self, name: &str, steam_id: Option<SteamId>) -> Result<Value> {
        self.call(
            write("CreateFamilyGroup")
                .param("name", name)
                .opt_param("steamid", steam_id),
        )
        .await
    }

    pub async fn delete_family_group(&self, family_group_id: u64) -> Result<Value> {
        self.call(write("DeleteFamilyGroup").param("family_group_id", family_group_id))
            .await
    }

    pub async fn force_accept_invite(
        &self,
        family_group_id: u64,
        steam_id: SteamId,
    ) -> Result<Value> {
        self.call(
            write("ForceAcceptInvite")
                .param("family_group_id", family_group_id)
                .param("steamid", steam_id),
        )
        .await
    }

    /// Invite a user; `role` uses the numeric values of [`FamilyRole`](crate::models::FamilyRole).
    pub async fn invite_to_family_group(
        &self,
        family_group_id: u64,
        receiver: SteamId,
        role: i32,
    ) -> Result<Value> {
        self.call(
            write("InviteToFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("receiver_steamid", receiver)
                .param("receiver_role", role),
        )
        .await
    }

    pub async fn join_family_group(&self, family_group_id: u64, nonce: u64) -> Result<Value> {
        self.call(
            write("JoinFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("nonce", nonce),
        )
        .await
    }

    pub async fn modify_family_group_details(
        &self,
        family_group_id: u64,
        name: &str,
    ) -> Result<Value> {
        self.call(
            write("ModifyFamilyGroupDetails")
                .param("family_group_id", family_group_id)
                .param("name", name),
        )
        .await
    }

    pub async fn remove_from_family_group(
        &self,
        family_group_id: u64,
        steam_id: SteamId,
    ) -> Result<Value> {
        self.call(
            write("RemoveFromFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("steamid_to_remove", steam_id),
        )
        .await
    }

    pub async fn request_purchase(
        &self,
        family_group_id: u64,
        shopping_cart_id: u64,
        store_country_code: &str,
        use_account_cart: bool,
    ) -> Result<Value> {
        self.call(
            write("RequestPurchase")
                .param("family_group_id", family_group_id)
                .param("gid_shopping_cart", shopping_cart_id)
                .param("store_country_code", store_country_code)
                .flag("use_account_cart", use_account_cart),
        )
        .await
    }

    pub async fn resend_invitation(&self, family_group_id: u64, steam_id: SteamId) -> Result<Value> {
        self.call(
            write("ResendInvitationToFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("steamid", steam_id),
        )
        .await
    }

    /// Answer a purchase request; `action` is Steam's numeric response code.
    pub async fn respond_to_requested_purchase(
        &self,
        family_group_id: u64,
        requester: SteamId,
        action: i32,
        request_id: u64,
    ) -> Result<Value> {
        self.call(
            write("RespondToRequestedPurchase")
                .param("family_group_id", family_group_id)
                .param("purchase_requester_steamid", requester)
                .param("action", action)
                .param("request_id", request_id),
        )
        .await
    }

    pub async fn rollback_family_group(&self, family_group_id: u64, target_time: i64) -> Result<Value> {
        self.call(
            write("RollbackFamilyGroup")
                .param("family_group_id", family_group_id)
                .param("rtime32_target", target_time),
        )
        .await
    }

    pub async fn set_family_cooldown_overrides(
        &self,
        family_group_id: u64,
        cooldown_count: u32,
    ) -> Result<Value> {
        self.call(
            write("SetFamilyCooldownOverrides")
                .param("family_group_id", family_group_id)
                .param("cooldown_count", cooldown_count),
        )
        .await
    }

    pub async fn set_preferred_lender(
        &self,
        family_group_id: u64,
        app_id: u32,
        lender: SteamId,
    ) -> Result<Value> {
        self.call(
            write("SetPreferredLender")
                .param("family_group_id", family_group_id)
                .param("appid", app_id)
                .param("lender_steamid", lender),
        )
        .await
    }

    pub async fn undelete_family_group(&self, family_group_id: u64) -> Result<Value> {
        self.call(write("UndeleteFamilyGroup").param("family_group_id", family_group_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::client::mock::MockDispatcher;
    use crate::models::FamilyRole;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_family_group_for_user() {
        let mock = MockDispatcher::new()
            .with_response(
                "IFamilyGroupsService/GetFamilyGroupForUser",
                json!({"response": {
                    "family_groupid": "4242",
                    "is_not_member_of_any_group": false,
                    "role": 2,
                    "cooldown_seconds_remaining": 0
                }}),
            )
            .await;

        let status = FamilyApi::new(&mock)
            .get_family_group_for_user(None)
            .await
            .unwrap();
        assert_eq!(status.family_groupid, "4242");
        assert_eq!(status.role(), FamilyRole::Child);

        let request = mock.single_request().await;
        assert_eq!(request.method, Method::GET);
        assert!(request.param("steamid").is_none());
    }

    #[tokio::test]
    async fn test_playtime_summary_is_post() {
        let mock = MockDispatcher::new()
            .with_response(
                "IFamilyGroupsService/GetPlaytimeSummary",
                json!({"response": {"entries": [
                    {"steamid": "76561197960435530", "appid": 440, "seconds_played": 7200}
                ]}}),
            )
            .await;

        let summary = FamilyApi::new(&mock).get_playtime_summary(4242).await.unwrap();
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.entries[0].hours_played(), 2.0);

        let request = mock.single_request().await;
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.param("family_groupid"), Some("4242"));
    }

    #[tokio::test]
    async fn test_raw_reads_return_response_object() {
        let mock = MockDispatcher::new()
            .with_response(
                "IFamilyGroupsService/GetSharedLibraryApps",
                json!({"response": {"apps": [{"appid": 10}], "owner_steamid": "1"}}),
            )
            .await;

        let options = SharedLibraryOptions {
            include_free: true,
            max_apps: Some(50),
            ..SharedLibraryOptions::default()
        };
        let apps = FamilyApi::new(&mock)
            .get_shared_library_apps(4242, &options)
            .await
            .unwrap();
        assert_eq!(apps["apps"][0]["appid"], 10);

        let request = mock.single_request().await;
        assert_eq!(request.param("include_free"), Some("1"));
        assert_eq!(request.param("include_own"), Some("0"));
        assert_eq!(request.param("max_apps"), Some("50"));
        assert!(request.param("language").is_none());
    }

    #[tokio::test]
    async fn test_mutations_use_their_own_methods() {
        let mock = MockDispatcher::new()
            .with_response("IFamilyGroupsService/ResendInvitationToFamilyGroup", json!({"response": {}}))
            .await
            .with_response("IFamilyGroupsService/RollbackFamilyGroup", json!({"response": {}}))
            .await;
        let api = FamilyApi::new(&mock);

        api.resend_invitation(7, SteamId(76561197960435530)).await.unwrap();
        api.rollback_family_group(7, 1_700_000_000).await.unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.method == Method::POST));
        assert_eq!(requests[1].param("rtime32_target"), Some("1700000000"));
    }

    #[tokio::test]
    async fn test_purchase_request_ids_are_indexed() {
        let mock = MockDispatcher::new()
            .with_response("IFamilyGroupsService/GetPurchaseRequests", json!({"response": {"requests": []}}))
            .await;

        FamilyApi::new(&mock)
            .get_purchase_requests(7, &[11, 12], false, None)
            .await
            .unwrap();

        let request = mock.single_request().await;
        assert_eq!(request.param("request_ids[0]"), Some("11"));
        assert_eq!(request.param("request_ids[1]"), Some("12"));
        assert_eq!(request.param("include_completed"), Some("0"));
    }

    #[tokio::test]
    async fn test_malformed_status_is_response_format() {
        let mock = MockDispatcher::new()
            .with_response(
                "IFamilyGroupsService/GetFamilyGroupForUser",
                json!({"response": {"membership_history": "none"}}),
            )
            .await;

        let err = FamilyApi::new(&mock)
            .get_family_group_for_user(Some(SteamId(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseFormat);
    }
}
