//! The challenge arena: wrapper markup and preset classes.

/// Class of the element that wraps challenge markup.
pub const ARENA_CONTAINER_CLASS: &str = "challenge-arena-container";

/// Wrap challenge markup in the arena container.
pub fn arena_markup(challenge_markup: &str) -> String {
    format!("<body><div class=\"{ARENA_CONTAINER_CLASS}\">{challenge_markup}</div></body>")
}

/// Base stylesheet of the arena.
///
/// Element defaults use plain type selectors so a single learner class
/// always outranks them.
pub const DEFAULT_ARENA_CSS: &str = r#"
body {
    margin: 0;
    padding: 0;
    display: flex;
    justify-content: center;
    align-items: center;
    width: 100%;
    height: 100%;
    overflow: auto;
    background-color: #2D3748;
    color: white;
    font-family: sans-serif;
}

.challenge-arena-container * {
    box-sizing: border-box;
}

div, span, p, section, article, header, footer, ul, ol, li,
plate, bento, apple, orange, pickle {
    min-width: 10px;
    min-height: 10px;
    background-color: rgba(255, 255, 255, 0.1);
    border: 1px dashed rgba(255, 255, 255, 0.2);
    color: white;
    display: block;
    padding: 5px;
    margin: 5px;
    font-size: 14px;
    text-align: center;
    line-height: 1.2;
    overflow: hidden;
    position: static;
    z-index: auto;
    opacity: 1;
    transform: none;
    transition: none;
    animation: none;
}

.box {
    width: 100px;
    height: 100px;
    background-color: #3B82F6;
    border: 2px solid #2563EB;
    display: flex;
    justify-content: center;
    align-items: center;
    color: white;
    font-weight: bold;
}

.item {
    width: 50px;
    height: 50px;
    background-color: #EC4899;
    border: 1px solid #BE185D;
    display: flex;
    justify-content: center;
    align-items: center;
    color: white;
    font-weight: bold;
}

.target {
    background-color: #10B981;
    border: 2px solid #059669;
}

.red-box { background-color: #EF4444; border-color: #DC2626; }
.blue-box { background-color: #3B82F6; border-color: #2563EB; }
.green-box { background-color: #10B981; border-color: #059669; }
.orange-box { background-color: #F59E0B; border-color: #D97706; }

.apple, .orange {
    width: 40px;
    height: 40px;
    border-radius: 50%;
    display: inline-flex;
    justify-content: center;
    align-items: center;
    color: white;
    font-size: 12px;
}

.apple { background-color: #EF4444; border: 2px solid #DC2626; }
.orange { background-color: #F59E0B; border: 2px solid #D97706; }

plate {
    width: 80px;
    height: 20px;
    background-color: #D1D5DB;
    border: 1px solid #9CA3AF;
    margin: 5px;
    display: flex;
    justify-content: center;
    align-items: center;
    color: #374151;
    font-size: 12px;
}

.table {
    min-height: 150px;
    background-color: #374151;
    display: flex;
    flex-wrap: wrap;
    gap: 10px;
    padding: 10px;
    border: 2px dashed #6B7280;
    justify-content: center;
    align-items: center;
}

.notification {
    width: 120px;
    height: 40px;
    background-color: #F59E0B;
    color: white;
    display: flex;
    justify-content: center;
    align-items: center;
    font-size: 14px;
    border-radius: 5px;
    padding: 5px;
}

.card {
    width: 100px;
    height: 150px;
    border: 2px solid;
    display: flex;
    justify-content: center;
    align-items: center;
    font-weight: bold;
    font-size: 18px;
}

.card.red { background-color: #EF4444; border-color: #DC2626; color: white; }
.card.blue { background-color: #3B82F6; border-color: #2563EB; color: white; }

.button-hover {
    padding: 10px 20px;
    background-color: #4F46E5;
    color: white;
    border: none;
    border-radius: 5px;
    cursor: pointer;
    font-size: 16px;
}

.star {
    width: 50px;
    height: 50px;
    background-color: gold;
    clip-path: polygon(50% 0%, 61% 35%, 98% 35%, 68% 57%, 79% 91%, 50% 70%, 21% 91%, 32% 57%, 2% 35%, 39% 35%);
}
"#;
