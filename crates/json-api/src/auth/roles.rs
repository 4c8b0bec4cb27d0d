//! Role guards, hooped after the auth middleware.

use salvo::prelude::*;

use bazaar_app::auth::Role;

use crate::extensions::*;

async fn require_role(
    role: Role,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.caller_or_401() {
        Ok(caller) if caller.role == role => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_) => res.render(
            StatusError::forbidden().brief(format!("This action requires the {role} role")),
        ),
        Err(error) => res.render(error),
    }
}

#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require_role(Role::Admin, req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn require_store(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require_role(Role::Store, req, depot, res, ctrl).await;
}
