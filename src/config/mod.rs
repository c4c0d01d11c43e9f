mod creds;
mod session_config;

use crate::abs_path::AbsPathBuf;
use crate::service::{Judge, SioJudge};
use crate::session::SessionClient;
use crate::{Console, GlobalOpt, Result};

pub use creds::{CredentialStore, Credentials};
pub use session_config::SessionConfig;

#[derive(Debug, Clone)]
enum Backend {
    Sio,
    #[cfg(test)]
    Mock(crate::service::MockJudge),
    #[cfg(test)]
    Unavailable,
}

/// Everything a command needs besides its own options.
#[derive(Debug, Clone)]
pub struct Config {
    store: CredentialStore,
    session: SessionConfig,
    backend: Backend,
}

impl Config {
    /// Builds config for the current directory.
    pub fn new(global_opt: &GlobalOpt) -> Result<Self> {
        let base_dir = AbsPathBuf::cwd()?;
        Ok(Self::with_backend(global_opt, base_dir, Backend::Sio))
    }

    fn with_backend(global_opt: &GlobalOpt, base_dir: AbsPathBuf, backend: Backend) -> Self {
        let store = CredentialStore::new(global_opt.creds_file.as_str(), base_dir);
        let session = SessionConfig::new(global_opt.timeout);
        Self {
            store,
            session,
            backend,
        }
    }

    pub fn load_credentials(&self, cnsl: &mut Console) -> Result<Credentials> {
        self.store.load(cnsl)
    }

    pub fn save_credentials(&self, creds: &Credentials, cnsl: &mut Console) -> Result<()> {
        self.store.save(creds, cnsl)
    }

    pub fn build_judge(&self) -> Result<Box<dyn Judge>> {
        match &self.backend {
            Backend::Sio => Ok(Box::new(SioJudge::new(self.session.build_client()?))),
            #[cfg(test)]
            Backend::Mock(mock) => Ok(Box::new(mock.clone())),
            #[cfg(test)]
            Backend::Unavailable => Err(crate::Error::msg("Could not setup client")),
        }
    }

    /// Loads credentials and prepares a session that is not yet authenticated.
    pub fn open_session(&self, cnsl: &mut Console) -> Result<SessionClient> {
        let creds = self.load_credentials(cnsl)?;
        let judge = self.build_judge()?;
        Ok(SessionClient::new(creds, judge))
    }

    #[cfg(test)]
    pub fn with_mock(
        base_dir: &std::path::Path,
        global_opt: GlobalOpt,
        mock: crate::service::MockJudge,
    ) -> Result<Self> {
        let base_dir = AbsPathBuf::try_new(base_dir)?;
        Ok(Self::with_backend(&global_opt, base_dir, Backend::Mock(mock)))
    }

    /// Config whose judge client can never be built.
    #[cfg(test)]
    pub fn with_unavailable_judge(base_dir: &std::path::Path) -> Result<Self> {
        let base_dir = AbsPathBuf::try_new(base_dir)?;
        Ok(Self::with_backend(
            &GlobalOpt::default(),
            base_dir,
            Backend::Unavailable,
        ))
    }
}
