//! MongoDB 연결 관리
//!
//! 회원 정보가 저장되는 데이터베이스 핸들을 제공합니다.
//! `mongodb::Client`는 내부적으로 커넥션 풀을 가지므로 `Database`를 클론해서 공유합니다.

use log::info;
use mongodb::{Client, options::ClientOptions};
use crate::config::MongoConfig;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// MongoDB 에 연결하고 `ping`으로 연결을 확인합니다.
    ///
    /// # Errors
    ///
    /// * `mongodb::error::Error` - URI 파싱 실패, 서버 연결 실패
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("haebang_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
