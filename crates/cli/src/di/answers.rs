use answer_dns_application::ports::{AnswersSource, HostResolver, UpstreamTransport};
use answer_dns_application::{RecurseForwarder, ReloadAnswersUseCase, ResolveQueryUseCase};
use answer_dns_domain::{AnswerStore, Config};
use answer_dns_infrastructure::answers::FileAnswersSource;
use answer_dns_infrastructure::dns::{DnsServerHandler, NetworkTransport};
use answer_dns_infrastructure::system::SystemHostResolver;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Wires the answers store, forwarder and hickory handler together.
pub struct AnswerServices {
    pub reload: Arc<ReloadAnswersUseCase>,
    pub handler: DnsServerHandler,
}

impl AnswerServices {
    /// The store starts empty; callers run `reload` once before serving.
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(ArcSwap::from_pointee(AnswerStore::empty()));

        let source: Arc<dyn AnswersSource> =
            Arc::new(FileAnswersSource::new(config.answers.path.clone()));
        let reload = Arc::new(ReloadAnswersUseCase::new(source, Arc::clone(&store)));

        let transport: Arc<dyn UpstreamTransport> = Arc::new(NetworkTransport::new());
        let resolver: Arc<dyn HostResolver> = Arc::new(SystemHostResolver::new());
        let forwarder = Arc::new(RecurseForwarder::new(
            transport,
            resolver,
            config.upstream.timeout(),
        ));

        let resolve = Arc::new(ResolveQueryUseCase::new(store, forwarder));
        let handler = DnsServerHandler::new(resolve, config.answers.ttl);

        Self { reload, handler }
    }
}
