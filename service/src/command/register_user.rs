//! [`Command`] for registering a new user.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, Catalog},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new user with an empty [`Catalog`].
#[derive(Clone, Debug)]
pub struct RegisterUser {
    /// [`user::Key`] of the new user.
    pub user: user::Key,
}

impl<Db> Command<RegisterUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Insert<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = Catalog;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: RegisterUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterUser { user } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(user.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::UserAlreadyExists(user)));
        }

        let catalog = Catalog::new(user);
        self.database()
            .execute(Insert(catalog.clone()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("registered user {}", catalog.owner());
        Ok(catalog)
    }
}

/// Error of [`RegisterUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// User with the provided [`user::Key`] is registered already.
    #[display("User {_0} already exists")]
    UserAlreadyExists(#[error(not(source))] user::Key),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture::{service, user},
        Config,
    };

    use super::{Command as _, ExecutionError, RegisterUser};

    #[test]
    fn rejects_registered_user() {
        let svc = service(Config::default());

        let err = svc
            .execute(RegisterUser { user: user("Ana") })
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::UserAlreadyExists(u) if *u == user("Ana"),
        ));

        let catalog = svc.execute(RegisterUser { user: user("Caio") }).unwrap();
        assert!(catalog.is_empty());
    }
}
