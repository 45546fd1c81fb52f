use uuid::Uuid;

use kernel::interface::auth::{Authenticator, PasswordHasher};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{Identity, IsAdmin, User, UserEmail, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{LoginDto, RegisterUserDto, RegisteredUserDto, UserDto};

#[async_trait::async_trait]
pub trait RegisterUserService:
    'static + Sync + Send + DependOnUserQuery + DependOnUserModifier
{
    /// Stores a new non-admin user and signs a token for it.
    #[tracing::instrument(skip_all, fields(email = %dto.email))]
    async fn register_user<H, A>(
        &self,
        hasher: &H,
        authenticator: &A,
        dto: RegisterUserDto,
    ) -> error_stack::Result<RegisteredUserDto, KernelError>
    where
        H: PasswordHasher,
        A: Authenticator,
    {
        let password = hasher.hash(&dto.password).await?;
        let mut connection = self.database_connection().transact().await?;
        let email = UserEmail::new(dto.email);
        let registered = self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?;
        if registered.is_some() {
            return Err(KernelError::Validation.with_message("User already registered."));
        }

        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(dto.name),
            email,
            password,
            IsAdmin::default(),
        );
        self.user_modifier().create(&mut connection, &user).await?;
        let token = authenticator.issue(&Identity::from(&user))?;
        connection.commit().await?;
        Ok(RegisteredUserDto {
            user: UserDto::from(user),
            token: token.into(),
        })
    }
}

impl<T> RegisterUserService for T where T: DependOnUserQuery + DependOnUserModifier {}

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    #[tracing::instrument(skip(self))]
    async fn get_me(&self, identity: &Identity) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, identity.user_id())
            .await?
            .ok_or_else(|| {
                KernelError::NotFound.with_message("The user with the given ID was not found.")
            })?;
        connection.commit().await?;
        Ok(UserDto::from(user))
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait LoginService: 'static + Sync + Send + DependOnUserQuery {
    /// Exchanges valid credentials for a token. Unknown email and wrong password look the same.
    #[tracing::instrument(skip_all, fields(email = %dto.email))]
    async fn login<H, A>(
        &self,
        hasher: &H,
        authenticator: &A,
        dto: LoginDto,
    ) -> error_stack::Result<String, KernelError>
    where
        H: PasswordHasher,
        A: Authenticator,
    {
        let invalid = || KernelError::Validation.with_message("Invalid email or password.");
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_email(&mut connection, &UserEmail::new(dto.email))
            .await?
            .ok_or_else(invalid)?;
        connection.commit().await?;

        if !hasher.verify(&dto.password, user.password()).await? {
            return Err(invalid());
        }
        let token = authenticator.issue(&Identity::from(&user))?;
        Ok(token.into())
    }
}

impl<T> LoginService for T where T: DependOnUserQuery {}

#[cfg(test)]
mod test {
    use time::Duration;

    use driver::auth::{BcryptPasswordHasher, JwtAuthenticator};
    use driver::database::MemoryDatabase;
    use kernel::interface::auth::Authenticator;
    use kernel::{ErrorMessage, KernelError};

    use crate::service::{GetGenreService, GetUserService, LoginService, RegisterUserService};
    use crate::transfer::{LoginDto, RegisterUserDto};

    fn auth() -> (BcryptPasswordHasher, JwtAuthenticator) {
        (
            BcryptPasswordHasher::new(4),
            JwtAuthenticator::new(b"secret", Duration::hours(1)),
        )
    }

    fn register_dto() -> RegisterUserDto {
        RegisterUserDto {
            name: "Mosh Hamedani".into(),
            email: "mosh@domain.com".into(),
            password: "12345".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (hasher, authenticator) = auth();

        let registered = db.register_user(&hasher, &authenticator, register_dto()).await?;
        assert!(!registered.user.is_admin);

        let identity = authenticator.authenticate(&registered.token)?;
        let me = db.get_me(&identity).await?;
        assert_eq!(me, registered.user);

        let token = db
            .login(
                &hasher,
                &authenticator,
                LoginDto {
                    email: "mosh@domain.com".into(),
                    password: "12345".into(),
                },
            )
            .await?;
        assert_eq!(authenticator.authenticate(&token)?, identity);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (hasher, authenticator) = auth();
        db.register_user(&hasher, &authenticator, register_dto()).await?;

        let report = db
            .register_user(&hasher, &authenticator, register_dto())
            .await
            .expect_err("already registered");
        assert_eq!(report.current_context(), &KernelError::Validation);
        assert_eq!(
            report.downcast_ref::<ErrorMessage>().map(AsRef::as_ref),
            Some("User already registered.")
        );
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let (hasher, authenticator) = auth();
        db.register_user(&hasher, &authenticator, register_dto()).await?;

        for (email, password) in [("mosh@domain.com", "54321"), ("nobody@domain.com", "12345")] {
            let report = db
                .login(
                    &hasher,
                    &authenticator,
                    LoginDto {
                        email: email.into(),
                        password: password.into(),
                    },
                )
                .await
                .expect_err("bad credentials");
            assert_eq!(report.current_context(), &KernelError::Validation);
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn hashing_does_not_hold_the_store() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let register = {
            let db = db.clone();
            tokio::spawn(async move {
                let hasher = BcryptPasswordHasher::new(12);
                let authenticator = JwtAuthenticator::new(b"secret", Duration::hours(1));
                db.register_user(&hasher, &authenticator, register_dto())
                    .await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let genres = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            db.get_all_genres(),
        )
        .await
        .expect("store is free while the password is hashed")?;
        assert!(genres.is_empty());
        assert!(!register.is_finished());

        let registered = register.await.expect("register task")?;
        assert_eq!(registered.user.email, "mosh@domain.com");
        Ok(())
    }
}
