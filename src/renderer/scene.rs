//! Scene drawing: turns a session into draw commands
//!
//! Fixed order every frame: clear, walls, player, text, present.

use std::io;

use glam::Vec2;

use crate::assets::SceneAssets;
use crate::platform::{Color, Renderer};
use crate::sim::{GamePhase, GameSession};

pub const BACKGROUND: Color = Color::BLACK;
pub const WALL_COLOR: Color = Color::GREEN;
pub const TEXT_COLOR: Color = Color::WHITE;
pub const HINT_COLOR: Color = Color::LIGHT_GREY;

/// HUD font sizes (line height in world units)
pub const HUD_TEXT_SIZE: f32 = 50.0;
pub const TITLE_TEXT_SIZE: f32 = 200.0;
pub const SCORE_TEXT_SIZE: f32 = 100.0;

/// Draw one complete frame and present it
pub fn draw_scene<R: Renderer + ?Sized>(
    session: &GameSession,
    assets: &SceneAssets,
    renderer: &mut R,
) -> io::Result<()> {
    renderer.clear(BACKGROUND);

    match session.phase {
        GamePhase::Intro => draw_intro(session, assets, renderer),
        GamePhase::Playing => draw_playing(session, assets, renderer),
        GamePhase::GameOver => draw_game_over(session, renderer),
    }

    renderer.present()
}

fn draw_intro<R: Renderer + ?Sized>(session: &GameSession, assets: &SceneAssets, renderer: &mut R) {
    let logo = &assets.logo;
    let pos = Vec2::new(
        session.world.width / 2.0 - logo.width() as f32 / 2.0,
        session.world.height / 2.0 - logo.height() as f32 / 2.0,
    );
    renderer.draw_image(logo, pos);
}

fn draw_playing<R: Renderer + ?Sized>(session: &GameSession, assets: &SceneAssets, renderer: &mut R) {
    for wall in &session.walls.walls {
        for segment in wall.visual_segments() {
            renderer.fill_rect(segment, WALL_COLOR);
        }
    }

    renderer.draw_image(&assets.player, session.player.rect.pos);

    let score = format!("Score: {}", session.score);
    renderer.draw_text(&score, HUD_TEXT_SIZE, TEXT_COLOR, Vec2::new(20.0, 20.0));
}

fn draw_game_over<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let mid_x = session.world.width / 2.0;
    let mid_y = session.world.height / 2.0;

    let lines = [
        ("GAME OVER".to_string(), TITLE_TEXT_SIZE, TEXT_COLOR, mid_y - 200.0),
        ("Press R to Restart".to_string(), HUD_TEXT_SIZE, HINT_COLOR, mid_y + 50.0),
        (format!("Score: {}", session.score), SCORE_TEXT_SIZE, TEXT_COLOR, mid_y + 150.0),
    ];

    for (text, size, color, y) in &lines {
        let x = mid_x - renderer.text_width(text, *size) / 2.0;
        renderer.draw_text(text, *size, *color, Vec2::new(x, *y));
    }
}
