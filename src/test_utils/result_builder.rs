use crate::identity::QueryIdentity;
use crate::QueryFault;
use crate::QueryResult;
use crate::QueryStatus;
use crate::TypeConfig;

/// Builder for the query result views fed into the engine by tests.
pub struct ResultBuilder<T>
where
    T: TypeConfig<V = String, FC = String>,
{
    result: QueryResult<T>,
}

impl<T> ResultBuilder<T>
where
    T: TypeConfig<V = String, FC = String>,
{
    pub fn new(identity: QueryIdentity) -> Self {
        Self {
            result: QueryResult {
                identity,
                status: QueryStatus::Pending,
                data: None,
                error: None,
                fetch_config: None,
            },
        }
    }

    pub fn status(
        mut self,
        status: QueryStatus,
    ) -> Self {
        self.result.status = status;
        self
    }

    pub fn data(
        mut self,
        data: &str,
    ) -> Self {
        self.result.data = Some(data.to_string());
        self
    }

    pub fn error(
        mut self,
        message: &str,
    ) -> Self {
        self.result.error = Some(QueryFault::new(self.result.identity.clone(), message));
        self.result.status = QueryStatus::Error;
        self
    }

    pub fn fetch_config(
        mut self,
        config: &str,
    ) -> Self {
        self.result.fetch_config = Some(config.to_string());
        self
    }

    pub fn build(self) -> QueryResult<T> {
        self.result
    }
}

pub fn pending_result<T>(identity: QueryIdentity) -> QueryResult<T>
where
    T: TypeConfig<V = String, FC = String>,
{
    ResultBuilder::new(identity).build()
}

pub fn success_result<T>(
    identity: QueryIdentity,
    data: &str,
) -> QueryResult<T>
where
    T: TypeConfig<V = String, FC = String>,
{
    ResultBuilder::new(identity).status(QueryStatus::Success).data(data).build()
}

pub fn error_result<T>(
    identity: QueryIdentity,
    message: &str,
) -> QueryResult<T>
where
    T: TypeConfig<V = String, FC = String>,
{
    ResultBuilder::new(identity).error(message).build()
}
