//! Default host list derived from the application ID.

use rand::seq::SliceRandom;

use crate::config::ApplicationId;
use crate::transport::{Accept, StatefulHost};

/// Returns the default hosts of an application, in priority order.
///
/// The primary read host (`{app}-dsn.algolia.net`) and primary write host
/// (`{app}.algolia.net`) come first, followed by the three fallback hosts
/// (`{app}-{1,2,3}.algolianet.com`) in random order.
///
/// ```rust
/// use algolia_transport::{default_hosts, ApplicationId};
///
/// let hosts = default_hosts(&ApplicationId::new("MY_APP").unwrap());
/// assert_eq!(hosts.len(), 5);
/// assert_eq!(hosts[0].url, "MY_APP-dsn.algolia.net");
/// ```
#[must_use]
pub fn default_hosts(application_id: &ApplicationId) -> Vec<StatefulHost> {
    let mut fallbacks: Vec<StatefulHost> = (1..=3)
        .map(|n| StatefulHost::new(format!("{application_id}-{n}.algolianet.com")))
        .collect();
    fallbacks.shuffle(&mut rand::thread_rng());

    let mut hosts = vec![
        StatefulHost::new(format!("{application_id}-dsn.algolia.net")).with_accept(Accept::Read),
        StatefulHost::new(format!("{application_id}.algolia.net")).with_accept(Accept::Write),
    ];
    hosts.extend(fallbacks);
    hosts
}
