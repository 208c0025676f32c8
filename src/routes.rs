use crate::{
    api::{analysis, baseline, role, unit},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let read_limiter = build_limiter(config.rate_read_per_min);
    let write_limiter = build_limiter(config.rate_write_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&read_limiter)) // rate limiting
            .service(
                web::scope("/roles")
                    // /roles
                    .service(
                        web::resource("")
                            .route(web::post().to(role::create_role))
                            .route(web::get().to(role::list_roles)),
                    )
                    // /roles/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(role::update_role))
                            .route(web::get().to(role::get_role))
                            .route(web::delete().to(role::delete_role)),
                    ),
            )
            .service(
                web::scope("/units")
                    // /units
                    .service(web::resource("").route(web::get().to(unit::list_units)))
                    // /units/{id}
                    .service(web::resource("/{id}").route(web::get().to(unit::get_unit))),
            )
            .service(
                web::scope("/analysis")
                    // /analysis/unit/{unit_id}
                    .service(
                        web::resource("/unit/{unit_id}")
                            .route(web::get().to(analysis::unit_analysis)),
                    )
                    // /analysis/unit/{unit_id}/row/{row_id}/projected
                    .service(
                        web::resource("/unit/{unit_id}/row/{row_id}/projected")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::put().to(analysis::update_projected_headcount)),
                    ),
            )
            .service(
                web::scope("/baselines")
                    // /baselines
                    .service(web::resource("").route(web::get().to(baseline::list_baselines)))
                    // /baselines/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(baseline::get_baseline)),
                    )
                    // /baselines/{id}/pareto
                    .service(
                        web::resource("/{id}/pareto")
                            .route(web::get().to(baseline::baseline_pareto)),
                    )
                    // /baselines/{id}/sectors/{name}
                    .service(
                        web::resource("/{id}/sectors/{name}")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::patch().to(baseline::update_sector)),
                    )
                    // /baselines/{id}/sectors/{name}/toggle
                    .service(
                        web::resource("/{id}/sectors/{name}/toggle")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::put().to(baseline::toggle_sector)),
                    ),
            ),
    );
}
