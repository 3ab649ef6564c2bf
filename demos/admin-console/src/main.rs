use aiguillage::{
    RenderDecision, Route, RouteTable, RouterOptions,
    errors::TableError,
    logging::{init_logging, print_title},
    routes,
};
use log::{info, warn};

/// The screens of the payment sandbox front-end: three admin list views under
/// a shared layout, and the mobile payment preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    AdminLayout,
    MerchantList,
    TransactionList,
    RefundList,
    PayPreview,
}

fn route_table() -> Result<RouteTable<AppView>, TableError> {
    RouteTable::build(
        routes![
            Route::children(
                "/admin",
                AppView::AdminLayout,
                vec![
                    Route::view("merchants", AppView::MerchantList),
                    Route::view("transactions", AppView::TransactionList),
                    Route::view("refunds", AppView::RefundList),
                    Route::default_redirect("/admin/merchants"),
                ],
            ),
            Route::view("/pay/preview/[prepay_id]", AppView::PayPreview),
            Route::redirect("/", "/admin"),
        ],
        RouterOptions::from_env(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let table = route_table()?;

    let mut paths: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| arg != "--quiet")
        .collect();
    if paths.is_empty() {
        // Default tour: both redirects, a capture and a miss
        paths = ["/", "/admin/transactions", "/pay/preview/wx20231001abc123", "/admin/unknown"]
            .map(String::from)
            .to_vec();
    }

    print_title("Admin console routes");

    for path in paths {
        let navigation = table.navigate(&path)?;

        for (from, to) in navigation
            .redirects
            .iter()
            .zip(navigation.redirects.iter().skip(1).chain([&navigation.path]))
        {
            info!("{} redirects to {}", from, to);
        }

        match navigation.decision {
            RenderDecision::Render {
                view,
                parents,
                params,
            } => {
                let mut chain: Vec<String> = parents.iter().map(|p| format!("{:?}", p)).collect();
                chain.push(format!("{:?}", view));

                if params.is_empty() {
                    info!("{} mounts {}", navigation.path, chain.join(" > "));
                } else {
                    info!(
                        "{} mounts {} with {:?}",
                        navigation.path,
                        chain.join(" > "),
                        params
                    );
                }
            }
            RenderDecision::NotFound => warn!("{} does not match any route", navigation.path),
            RenderDecision::Redirect { .. } => unreachable!("navigate follows redirects"),
        }
    }

    Ok(())
}
