//
//  rollbar-provider
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use rollbar_provider::api::RollbarClient;

pub const ACCOUNT_TOKEN: &str = "account-token-123";
pub const PROJECT_TOKEN: &str = "project-token-456";
pub const AUTH_HEADER: &str = "x-rollbar-access-token";

/// A client with both tokens pointed at a mock server.
pub fn client(server: &mockito::ServerGuard) -> RollbarClient {
    RollbarClient::builder()
        .base_url(server.url())
        .account_token(ACCOUNT_TOKEN)
        .project_token(PROJECT_TOKEN)
        .build()
        .expect("client should build")
}

/// A client with only the account token.
pub fn account_only_client(server: &mockito::ServerGuard) -> RollbarClient {
    RollbarClient::builder()
        .base_url(server.url())
        .account_token(ACCOUNT_TOKEN)
        .build()
        .expect("client should build")
}

/// Wraps a JSON payload in Rollbar's `{"err": 0, "result": ..}` envelope.
pub fn envelope(result: serde_json::Value) -> String {
    serde_json::json!({ "err": 0, "result": result }).to_string()
}
