//! Built-in scenes.
//!
//! `figure_scene` is the articulated puppet: an upside-down heart body whose
//! tip handle carries a round head and two arms. Arms pin their elbow row so
//! only the hand end follows drags. Keyframes give the body a breathing walk,
//! the head a nod and the arms a swing.

use crate::bundle::Breathing;
use crate::error::{FfdError, Result};
use crate::geometry::sampler::{Curve, Sampling};
use crate::lattice::Region;
use crate::model::{Color, LatticeId, ShapeStyle};
use crate::{Engine, EngineConfig, SceneBuilder};

// Reference canvas the hand-placed arm coordinates were laid out on
const REF_CANVAS: f32 = 600.0;
const WALK_SIZE: f32 = 40.0;
const BODY_BOB: f32 = 5.0;
const NOD_SIZE: f32 = 5.0;
const SWING_Y: f32 = 15.0;
const SWING_X: f32 = 3.0;

const BLACK: Color = Color::rgb(0, 0, 0);
const DARK_BLUE: Color = Color::rgb(0, 0, 0x66);

fn style(fill: Color, stroke: Color) -> ShapeStyle {
    ShapeStyle { fill, stroke }
}

/// One heart on a single breathing lattice spanning the padded canvas.
pub fn heart_scene(config: EngineConfig) -> Result<Engine> {
    config.validate()?;
    let mut sb = SceneBuilder::new(config);
    let c = sb.config().clone();
    let region = Region { x: c.padding, y: c.padding, width: c.grid_width(), height: c.grid_height() };
    let id = sb.add_lattice("heart", c.grid_rows, c.grid_cols, region)?;
    bundle(&mut sb, id)?.breathing = Some(Breathing { x_factor: 1.0, y_factor: 1.0 });
    sb.add_shape("heart", id, Curve::Heart, Sampling::with_count(0), ShapeStyle::default())?;
    sb.build()
}

/// Body, head and two arms; the body's tip handle carries the other three.
pub fn figure_scene(config: EngineConfig) -> Result<Engine> {
    config.validate()?;
    let mut sb = SceneBuilder::new(config);
    let c = sb.config().clone();
    let (gw, gh, pad) = (c.grid_width(), c.grid_height(), c.padding);
    let sx = c.canvas_width / REF_CANVAS;
    let sy = c.canvas_height / REF_CANVAS;
    let n = Sampling::with_count(0);

    // Body
    let body = sb.add_lattice(
        "body",
        2,
        2,
        Region { x: gw / 3.0, y: pad * 4.0, width: gw / 2.0, height: gh * 8.0 / 10.0 },
    )?;
    {
        let b = bundle(&mut sb, body)?;
        b.breathing = Some(Breathing { x_factor: 1.0, y_factor: 0.5 });
        let cols = b.rest.cols();
        // feet alternate; applied before the half turn so they land at the bottom
        b.rest.at_mut(0, 0).y += WALK_SIZE;
        b.expand.at_mut(0, cols - 1).y += WALK_SIZE;
        b.user_rest.translate(0.0, -BODY_BOB);
        b.user_expand.translate(0.0, BODY_BOB);
        b.rotate_half_turn();
    }
    sb.add_shape("heart", body, Curve::Heart, n, style(Color::rgb(255, 0, 0), Color::rgb(0x66, 0, 0)))?;
    sb.add_shape(
        "stomach",
        body,
        Curve::Ellipse { half_width: 5.0, half_height: 10.0 },
        n,
        style(Color::rgb(0, 0, 139), DARK_BLUE),
    )?;

    // Head
    let head = sb.add_lattice(
        "head",
        c.grid_rows,
        c.grid_cols,
        Region { x: gw / 3.0, y: 10.0, width: gw / 2.0, height: gh / 2.0 },
    )?;
    {
        let b = bundle(&mut sb, head)?;
        let (mr, mc) = ((b.user_rest.rows() - 1) / 2, (b.user_rest.cols() - 1) / 2);
        b.user_rest.at_mut(mr, mc).y -= NOD_SIZE;
        b.user_expand.at_mut(mr, mc).y += NOD_SIZE;
    }
    sb.add_shape("head", head, Curve::Circle { radius: 15.0 }, n, style(Color::rgb(173, 216, 230), BLACK))?;
    sb.add_shape("eye_r", head, Curve::Circle { radius: 2.0 }, n.offset(-5.0, 0.0), style(BLACK, BLACK))?;
    sb.add_shape("eye_l", head, Curve::Circle { radius: 2.0 }, n.offset(5.0, 0.0), style(BLACK, BLACK))?;
    sb.add_shape(
        "mouth",
        head,
        Curve::Ellipse { half_width: 5.0, half_height: 2.0 },
        n.offset(0.0, -10.0),
        style(BLACK, BLACK),
    )?;

    // Arms: elbows at row 0, hands at row 1
    let arm_l = sb.add_lattice(
        "arm_left",
        2,
        2,
        Region { x: gw * 2.0 / 3.0, y: pad * 6.0, width: 90.0, height: 150.0 },
    )?;
    place_arm(&mut sb, arm_l, [(291.0, 245.0), (280.0, 298.0), (52.0, 353.0), (131.0, 512.0)], (117.0, 415.0), -1.0, sx, sy)?;
    let arm_r = sb.add_lattice(
        "arm_right",
        2,
        2,
        Region { x: gw / 3.0, y: pad * 6.0, width: 90.0, height: 150.0 },
    )?;
    place_arm(&mut sb, arm_r, [(305.0, 298.0), (293.0, 247.0), (478.0, 528.0), (555.0, 376.0)], (486.0, 432.0), 1.0, sx, sy)?;
    let arm = Curve::Ellipse { half_width: 8.0, half_height: 14.0 };
    sb.add_shape("arm_left", arm_l, arm, n, style(Color::rgb(0, 128, 0), DARK_BLUE))?;
    sb.add_shape("arm_right", arm_r, arm, n, style(Color::rgb(0, 0, 255), DARK_BLUE))?;

    // The heart's tip (bottom-left user handle after the half turn) carries everything else
    {
        let b = bundle(&mut sb, body)?;
        let tip_row = b.user_live.rows() - 1;
        b.set_user_carries(tip_row, 0, vec![head, arm_l, arm_r]);
    }

    sb.build()
}

/// Put a 2×2 arm lattice at hand-placed corners, pin the elbow row and add the swing.
/// `side` is -1 for the left arm and 1 for the right.
#[allow(clippy::too_many_arguments)]
fn place_arm(
    sb: &mut SceneBuilder,
    id: LatticeId,
    corners: [(f32, f32); 4],
    handle: (f32, f32),
    side: f32,
    sx: f32,
    sy: f32,
) -> Result<()> {
    let b = bundle(sb, id)?;
    for (k, (x, y)) in corners.into_iter().enumerate() {
        let p = b.live.at_mut(k / 2, k % 2);
        p.x = x * sx;
        p.y = y * sy;
    }
    let u = b.user_live.at_mut(0, 0);
    u.x = handle.0 * sx;
    u.y = handle.1 * sy;
    b.capture_keyframes();
    b.pin_row(0);

    b.user_rest.at_mut(0, 0).y += SWING_Y;
    b.user_expand.at_mut(0, 0).y -= SWING_Y;
    b.user_rest.at_mut(0, 0).x += side * SWING_X;
    b.user_expand.at_mut(0, 0).x -= side * SWING_X;
    Ok(())
}

fn bundle(sb: &mut SceneBuilder, id: LatticeId) -> Result<&mut crate::LatticeBundle> {
    sb.bundle_mut(id).ok_or(FfdError::UnknownLattice(id))
}
