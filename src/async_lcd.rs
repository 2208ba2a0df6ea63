use embedded_hal_async::{delay::DelayNs, i2c::I2c};

use crate::{
    escape_token, Backlight, BitMode, CharacterSize, Commands, DisplayControl, DisplayShift, Error,
    Lines, Mode, TextDirection, ENABLE, ROW_OFFSETS,
};

/// API to write to the LCD.
pub struct Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    delay: &'a mut D,
    address: u8,
    cols: u8,
    rows: u8,
    character_size: CharacterSize,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
    backlight: Backlight,
}

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with only the I2C and delay instance. Geometry
    /// defaults to the common 20x4 module at address `0x27`.
    pub fn new(i2c: &'a mut I, delay: &'a mut D) -> Self {
        Self {
            i2c,
            delay,
            address: 0x27,
            cols: 20,
            rows: 4,
            character_size: CharacterSize::Dots5x8,
            display_function: 0,
            display_control: 0,
            display_mode: 0,
            backlight: Backlight::On,
        }
    }

    /// Set I2C address, see [lcd address].
    ///
    /// [lcd address]: https://www.ardumotive.com/i2clcden.html
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Number of columns.
    pub fn with_cols(mut self, cols: u8) -> Self {
        self.cols = cols;
        self
    }

    /// Number of rows.
    pub fn with_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    /// Font size, only honored on single-row displays.
    pub fn with_character_size(mut self, character_size: CharacterSize) -> Self {
        self.character_size = character_size;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight = backlight;
        self
    }

    /// Initializes the hardware, see [`crate::sync_lcd::Lcd::init`]. The
    /// async variant only changes how the delays suspend, ordering and
    /// framing are identical.
    pub async fn init(mut self) -> Result<Self, Error<I::Error>> {
        self.display_function = if self.rows > 1 {
            BitMode::Bit4 as u8 | Lines::Two as u8
        } else if self.character_size == CharacterSize::Dots5x10 {
            Lines::One as u8 | CharacterSize::Dots5x10 as u8
        } else {
            Lines::One as u8 | CharacterSize::Dots5x8 as u8
        };

        // Initial delay to wait for init after power on.
        self.delay.delay_ms(50).await;

        // Init with 8 bit mode
        let mode_8bit = Mode::FunctionSet as u8 | BitMode::Bit8 as u8;
        self.write4bits(mode_8bit).await?;
        self.delay.delay_ms(5).await;
        self.write4bits(mode_8bit).await?;
        self.delay.delay_ms(5).await;
        self.write4bits(mode_8bit).await?;
        self.delay.delay_us(150).await;

        // Switch to 4 bit mode
        self.write4bits(Mode::FunctionSet as u8 | BitMode::Bit4 as u8)
            .await?;

        self.command(Mode::FunctionSet as u8 | self.display_function)
            .await?;

        // Display on, no cursor, no blinking
        self.update_display_control(DisplayControl::Display as u8)
            .await?;
        self.clear().await?;

        // Text flows left to right, no autoscroll
        self.update_display_mode(TextDirection::LeftToRight as u8 | DisplayShift::Decrement as u8)
            .await?;
        self.return_home().await?;
        Ok(self)
    }

    async fn expander_write(&mut self, byte: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.address, &[byte | self.backlight as u8])
            .await
            .map_err(Error::Bus)?;
        self.delay.delay_us(100).await;
        Ok(())
    }

    async fn write4bits(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.expander_write(data).await?;
        self.expander_write(data | ENABLE).await?;
        self.delay.delay_us(500).await; // enable pulse width
        self.expander_write(data & !ENABLE).await?;
        self.delay.delay_us(100).await; // data hold time
        Ok(())
    }

    async fn send(&mut self, data: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        let high_bits: u8 = data & 0xf0;
        let low_bits: u8 = (data << 4) & 0xf0;
        self.write4bits(high_bits | mode as u8).await?;
        self.write4bits(low_bits | mode as u8).await?;
        Ok(())
    }

    async fn command(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Cmd).await
    }

    async fn update_display_control(&mut self, control: u8) -> Result<(), Error<I::Error>> {
        self.display_control = control;
        self.command(Mode::DisplayControl as u8 | control).await
    }

    async fn update_display_mode(&mut self, mode: u8) -> Result<(), Error<I::Error>> {
        self.display_mode = mode;
        self.command(Mode::EntrySet as u8 | mode).await
    }

    /// Clear the display
    pub async fn clear(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::Clear as u8).await?;
        self.delay.delay_ms(2).await;
        Ok(())
    }

    /// Return cursor to upper left corner, i.e. (0,0).
    pub async fn return_home(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ReturnHome as u8).await?;
        self.delay.delay_ms(2).await;
        Ok(())
    }

    /// Move the cursor to (col, row), zero based. Out of range coordinates
    /// are clamped to the last column/row, not rejected.
    pub async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<I::Error>> {
        let row = row
            .min(self.rows.saturating_sub(1))
            .min(ROW_OFFSETS.len() as u8 - 1);
        let col = col.min(self.cols.saturating_sub(1));
        self.command(Mode::DDRAMAddr as u8 | (col + ROW_OFFSETS[row as usize]))
            .await
    }

    /// Turn the display on.
    pub async fn display_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Display as u8)
            .await
    }

    /// Turn the display off.
    pub async fn display_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Display as u8))
            .await
    }

    /// Show the cursor.
    pub async fn cursor_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Cursor as u8)
            .await
    }

    /// Hide the cursor.
    pub async fn cursor_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Cursor as u8))
            .await
    }

    /// Blink the cursor position.
    pub async fn blink_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Blink as u8)
            .await
    }

    /// Stop blinking the cursor position.
    pub async fn blink_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Blink as u8))
            .await
    }

    /// Shift the whole display one position to the left.
    pub async fn scroll_display_left(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ShiftDisplayLeft as u8).await
    }

    /// Shift the whole display one position to the right.
    pub async fn scroll_display_right(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ShiftDisplayRight as u8).await
    }

    /// Text flows left to right.
    pub async fn left_to_right(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode | TextDirection::LeftToRight as u8)
            .await
    }

    /// Text flows right to left.
    pub async fn right_to_left(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode & !(TextDirection::LeftToRight as u8))
            .await
    }

    /// Shift the display on every written character.
    pub async fn autoscroll_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode | DisplayShift::Increment as u8)
            .await
    }

    /// Keep the display still while writing.
    pub async fn autoscroll_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode & !(DisplayShift::Increment as u8))
            .await
    }

    /// Switch the backlight. The state also rides along with every following
    /// expander write.
    pub async fn backlight(&mut self, backlight: Backlight) -> Result<(), Error<I::Error>> {
        self.backlight = backlight;
        self.expander_write(0).await
    }

    /// Upload a glyph to one of the 8 CGRAM slots, see
    /// [`crate::sync_lcd::Lcd::create_char`].
    pub async fn create_char(&mut self, slot: u8, pattern: &[u8]) -> Result<(), Error<I::Error>> {
        if slot > 7 {
            return Err(Error::InvalidSlot);
        }
        if pattern.len() > 8 {
            return Err(Error::InvalidPatternLength);
        }
        if pattern.iter().any(|&row| row > 0x1f) {
            return Err(Error::InvalidPatternValue);
        }
        self.command(Mode::CGRAMAddr as u8 | (slot << 3)).await?;
        for i in 0..8 {
            self.write_byte(pattern.get(i).copied().unwrap_or(0)).await?;
        }
        Ok(())
    }

    /// Write a raw byte as character data at the cursor position.
    pub async fn write_byte(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Data).await
    }

    /// Write string to display.
    pub async fn write_str(&mut self, data: &str) -> Result<(), Error<I::Error>> {
        for c in data.chars() {
            self.write_byte(c as u8).await?;
        }
        Ok(())
    }

    /// Write a string, substituting `{0xHH}` tokens with the literal byte
    /// value. Sequences that do not match the token exactly fall through
    /// character by character.
    pub async fn write_str_escaped(&mut self, data: &str) -> Result<(), Error<I::Error>> {
        let mut rest = data;
        loop {
            if let Some(value) = escape_token(rest) {
                self.write_byte(value).await?;
                rest = &rest[6..];
            } else if let Some(c) = rest.chars().next() {
                self.write_byte(c as u8).await?;
                rest = &rest[c.len_utf8()..];
            } else {
                return Ok(());
            }
        }
    }

    /// Write a full line, truncated and padded with spaces to the display
    /// width so that leftovers from an earlier, longer write are gone. With
    /// `centered` the text is indented by half the free width.
    pub async fn write_line(
        &mut self,
        data: &str,
        line: u8,
        centered: bool,
    ) -> Result<(), Error<I::Error>> {
        self.set_cursor(0, line).await?;
        let width = self.cols as usize;
        let mut written = 0;
        if centered {
            let padding = width.saturating_sub(data.chars().count()) / 2;
            while written < padding {
                self.write_byte(b' ').await?;
                written += 1;
            }
        }
        for c in data.chars() {
            if written == width {
                break;
            }
            self.write_byte(c as u8).await?;
            written += 1;
        }
        while written < width {
            self.write_byte(b' ').await?;
            written += 1;
        }
        Ok(())
    }

    /// Overwrite a line with spaces.
    pub async fn clear_line(&mut self, line: u8) -> Result<(), Error<I::Error>> {
        self.write_line("", line, false).await
    }
}
