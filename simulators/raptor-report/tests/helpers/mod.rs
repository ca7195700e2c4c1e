#![allow(dead_code)]

pub mod stub;

use raptor::types::Credentials;
use raptor::{Client, ClientConfig};
use std::time::Duration;

use self::stub::{StubServer, STUB_CLIENT_ID, STUB_CLIENT_SECRET};

pub fn client_config(stub: &StubServer) -> ClientConfig {
    ClientConfig::new(Credentials::new(STUB_CLIENT_ID, STUB_CLIENT_SECRET))
        .with_base_url(stub.base_url())
        .with_timeout(Duration::from_secs(5))
}

pub fn client_for(stub: &StubServer) -> Client {
    Client::new(client_config(stub)).expect("client builds")
}

pub async fn authenticated_client(stub: &StubServer) -> Client {
    let mut client = client_for(stub);
    client.authenticate().await.expect("stub accepts credentials");
    client
}
