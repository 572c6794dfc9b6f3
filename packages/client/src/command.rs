//! Parsing of the slash commands typed at the prompt.

use verdant_server::infrastructure::dto::websocket::{InboundMessage, WebinarIdDto};

use crate::error::CommandError;

pub const HELP: &str = "\
/log <category> <quantity> <unit> [description]   log an activity
/join <webinar_id>                                join a webinar room
/leave <webinar_id>                               leave a webinar room
/say <webinar_id> <message>                       talk in a webinar room
/goal <category> <target> <timeframe>             set a goal
/help                                             show this help
/quit                                             disconnect";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(InboundMessage),
    Help,
    Quit,
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Err(CommandError::NotACommand);
    };
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "log" => {
            let mut words = args.split_whitespace();
            let usage = CommandError::Usage("/log <category> <quantity> <unit> [description]");
            let category = words.next().ok_or(usage.clone())?;
            let quantity = parse_number(words.next().ok_or(usage.clone())?)?;
            let unit = words.next().ok_or(usage)?;
            let description = words.collect::<Vec<_>>().join(" ");
            let description = (!description.is_empty()).then_some(description);
            Command::Send(InboundMessage::LogActivity {
                category: Some(category.to_string()),
                quantity: Some(quantity),
                unit: Some(unit.to_string()),
                description,
            })
        }
        "join" => Command::Send(InboundMessage::JoinWebinar {
            webinar_id: single_webinar_id(args, "/join <webinar_id>")?,
        }),
        "leave" => Command::Send(InboundMessage::LeaveWebinar {
            webinar_id: single_webinar_id(args, "/leave <webinar_id>")?,
        }),
        "say" => {
            let usage = CommandError::Usage("/say <webinar_id> <message>");
            let (webinar_id, text) = args.split_once(char::is_whitespace).ok_or(usage.clone())?;
            let text = text.trim();
            if text.is_empty() {
                return Err(usage);
            }
            Command::Send(InboundMessage::WebinarMessage {
                webinar_id: WebinarIdDto::from(webinar_id),
                message_text: Some(text.to_string()),
            })
        }
        "goal" => {
            let parts: Vec<&str> = args.split_whitespace().collect();
            let [category, target, timeframe] = parts.as_slice() else {
                return Err(CommandError::Usage("/goal <category> <target> <timeframe>"));
            };
            Command::Send(InboundMessage::UpdateGoal {
                category: Some(category.to_string()),
                target: Some(parse_number(target)?),
                timeframe: Some(timeframe.to_string()),
            })
        }
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn single_webinar_id(args: &str, usage: &'static str) -> Result<WebinarIdDto, CommandError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    match parts.as_slice() {
        [id] => Ok(WebinarIdDto::from(*id)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_number(value: &str) -> Result<f64, CommandError> {
    value.parse::<f64>().map_err(|_| CommandError::InvalidNumber {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_with_description() {
        // テスト項目: /log は残りの入力を説明として扱う
        // when (操作):
        let command = parse_command("/log transportation 10 car_km bike was broken").unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Some(Command::Send(InboundMessage::LogActivity {
                category: Some("transportation".to_string()),
                quantity: Some(10.0),
                unit: Some("car_km".to_string()),
                description: Some("bike was broken".to_string()),
            }))
        );
    }

    #[test]
    fn test_parse_webinar_commands() {
        // テスト項目: /join /leave /say は数値の Webinar ID を数値として送る
        // when (操作):
        let join = parse_command("/join 42").unwrap();
        let leave = parse_command("/leave climate-101").unwrap();
        let say = parse_command("/say 42   hello there ").unwrap();

        // then (期待する結果):
        assert_eq!(
            join,
            Some(Command::Send(InboundMessage::JoinWebinar {
                webinar_id: WebinarIdDto::Number(42)
            }))
        );
        assert_eq!(
            leave,
            Some(Command::Send(InboundMessage::LeaveWebinar {
                webinar_id: WebinarIdDto::Text("climate-101".to_string())
            }))
        );
        assert_eq!(
            say,
            Some(Command::Send(InboundMessage::WebinarMessage {
                webinar_id: WebinarIdDto::Number(42),
                message_text: Some("hello there".to_string()),
            }))
        );
    }

    #[test]
    fn test_parse_goal_and_control_commands() {
        // テスト項目: /goal と /help /quit、空行
        // when (操作):
        let goal = parse_command("/goal energy 120 monthly").unwrap();

        // then (期待する結果):
        assert_eq!(
            goal,
            Some(Command::Send(InboundMessage::UpdateGoal {
                category: Some("energy".to_string()),
                target: Some(120.0),
                timeframe: Some("monthly".to_string()),
            }))
        );
        assert_eq!(parse_command("/help").unwrap(), Some(Command::Help));
        assert_eq!(parse_command("  /quit ").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 不正な入力はそれぞれのエラーになる
        // then (期待する結果):
        assert_eq!(parse_command("hello").unwrap_err(), CommandError::NotACommand);
        assert_eq!(
            parse_command("/dance").unwrap_err(),
            CommandError::UnknownCommand("dance".to_string())
        );
        assert_eq!(
            parse_command("/log diet lots meal").unwrap_err(),
            CommandError::InvalidNumber {
                value: "lots".to_string()
            }
        );
        assert!(matches!(
            parse_command("/say 42").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert!(matches!(
            parse_command("/goal energy 120").unwrap_err(),
            CommandError::Usage(_)
        ));
        assert!(matches!(
            parse_command("/join").unwrap_err(),
            CommandError::Usage(_)
        ));
    }
}
